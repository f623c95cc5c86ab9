//! List property listings

use anyhow::Result;

use crate::content::ContentLoader;
use crate::Site;

/// Print all listings, newest first
pub fn run(site: &Site) -> Result<()> {
    let loader = ContentLoader::new(site);
    let properties = loader.load_all()?;

    println!("Properties ({}):", properties.len());
    for property in properties {
        println!(
            "  {} - {} [{}]",
            property.date.as_deref().unwrap_or("no date"),
            property.title.as_deref().unwrap_or("Untitled"),
            property.slug
        );
    }

    Ok(())
}
