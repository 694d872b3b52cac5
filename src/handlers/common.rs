pub async fn root() -> &'static str {
    "Portfolio content API. See /api/home, /api/posts/{slug}, /api/categories"
}

pub async fn health() -> &'static str {
    "OK"
}
