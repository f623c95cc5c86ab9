//! Scaffold a new property listing

use anyhow::{bail, Result};
use std::fs;

use crate::Site;

/// Create `<slug>.md` in the content directory with a front-matter template
pub fn run(site: &Site, title: &str) -> Result<()> {
    let slug = slug::slugify(title);
    fs::create_dir_all(&site.content_dir)?;

    let file_path = site.content_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        bail!("Listing already exists: {:?}", file_path);
    }

    let today = chrono::Local::now().format("%Y-%m-%d");
    let content = format!(
        r#"---
title: {title}
date: "{today}"
location: ""
address: ""
propertyType: ""
status: Active
---

"#
    );

    fs::write(&file_path, content)?;
    println!("Created: {:?}", file_path);

    Ok(())
}
