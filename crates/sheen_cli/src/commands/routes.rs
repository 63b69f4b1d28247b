use anyhow::Result;
use sheen_site::{Route, Router, SiteConfig};

pub fn run(config: &SiteConfig) -> Result<()> {
    let router = Router::new(config.layout.base_path.clone());

    for route in Route::ALL {
        let href = router.href(route).unwrap_or_default();
        let sections: Vec<String> = route.sections().iter().map(|s| s.to_string()).collect();
        println!("{:<12} {:<20} {}", route.name(), href, sections.join(", "));
    }
    println!("{:<12} {:<20} (any other path)", Route::NotFound.name(), "*");

    Ok(())
}
