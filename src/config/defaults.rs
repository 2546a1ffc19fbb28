use super::{ChangeFreq, SitemapRoute};

pub fn site_name() -> String {
    "Hello World Co-Op".to_string()
}

pub fn hostname() -> String {
    "http://localhost:3000".to_string()
}

pub fn language() -> String {
    "en".to_string()
}

pub fn content_host() -> String {
    "http://127.0.0.1:4943".to_string()
}

pub fn output_dir() -> String {
    "dist".to_string()
}

pub fn metadata_path() -> String {
    "data/blog-metadata.json".to_string()
}

pub fn static_routes() -> Vec<SitemapRoute> {
    vec![
        SitemapRoute::new("/", ChangeFreq::Weekly, 1.0),
        SitemapRoute::new("/blog", ChangeFreq::Daily, 0.8),
        SitemapRoute::new("/privacy-policy", ChangeFreq::Yearly, 0.3),
        SitemapRoute::new("/terms-of-service", ChangeFreq::Yearly, 0.3),
    ]
}

pub fn shell_routes() -> Vec<String> {
    vec![
        "/login".to_string(),
        "/signup".to_string(),
        "/profile".to_string(),
    ]
}

pub fn ssr_command() -> Vec<String> {
    [
        "npx",
        "vite",
        "build",
        "--ssr",
        "src/entry-server.tsx",
        "--outDir",
        "dist-ssr",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub fn ssr_out_dir() -> String {
    "dist-ssr".to_string()
}

pub fn ssr_entry() -> String {
    "entry-server.js".to_string()
}

pub fn root_id() -> String {
    "root".to_string()
}
