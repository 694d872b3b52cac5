mod home_listing;
mod post_detail;
