use anyhow::{Context, Result};
use brand_site_core::config::CONFIG_FILE;
use std::fs;
use std::path::{Path, PathBuf};

/// Escape a string for a TOML basic string.
///
/// The config is written as a commented template, so it is assembled by hand
/// rather than serialized.
fn toml_escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\x08', "\\b")
        .replace('\x0C', "\\f")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Directory name turned into a readable site name: `jane-doe` -> `Jane Doe`
fn site_name_from_dir(path: &Path) -> String {
    let stem = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name = stem
        .split(['-', '_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    if name.is_empty() {
        "Personal Brand".to_string()
    } else {
        name
    }
}

/// Scaffold a new site project.
///
/// Creates `site.toml`, one sample file per content type under `content/`,
/// and the `public/data/` output directory. Refuses to overwrite an existing
/// `site.toml`.
pub fn run(path: PathBuf) -> Result<()> {
    println!("Initializing site project: {}", path.display());

    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!(
            "{} already exists at {}\nHint: Delete it first or use a different directory",
            CONFIG_FILE,
            config_path.display()
        );
    }

    let site_name = site_name_from_dir(&path);
    create_directory_structure(&path)?;
    generate_site_toml(&path, &site_name)?;
    generate_sample_content(&path, &site_name)?;

    println!("\n✓ Created project for '{}'", site_name);
    println!("\nNext steps:");
    println!("  1. Edit site.toml (set [feed] url and [seo] site_url)");
    println!("  2. Replace the samples under content/");
    println!("  3. Run: brand-site generate --project {}", path.display());

    Ok(())
}

fn create_directory_structure(base: &Path) -> Result<()> {
    for dir in [
        "content/testimonials",
        "content/press",
        "content/logos",
        "content/seo",
        "public/data",
        "public/images",
    ] {
        fs::create_dir_all(base.join(dir))
            .with_context(|| format!("Failed to create {}", base.join(dir).display()))?;
    }
    Ok(())
}

fn generate_site_toml(base: &Path, site_name: &str) -> Result<()> {
    let name = toml_escape_string(site_name);
    let template = format!(
        r#"# Site configuration. Every section is optional.

[paths]
content_dir = "content"
output_dir = "public/data"
public_dir = "public"

[defaults]
site_name = "{name}"
about_image = "/images/about.jpg"
press_image = "/images/press-placeholder.jpg"
cta_text = "Kontakt aufnehmen"
cta_link = "/#contact"
# testimonial_image = "/images/testimonial-placeholder.jpg"

[seo]
title = "{name}"
description = "Speaker, Autor und Berater"
keywords = ["Keynote", "Beratung"]
og_image = "/images/og-image.jpg"
site_url = "https://example.com"

[feed]
url = "https://example.com/feed.xml"
source_name = "FUNKE Mediengruppe"
api_limit = 10
cache_limit = 20
"#
    );

    fs::write(base.join(CONFIG_FILE), template).context("Failed to write site.toml")?;
    Ok(())
}

fn generate_sample_content(base: &Path, site_name: &str) -> Result<()> {
    let title = site_name.replace('"', "'");
    let samples = [
        (
            "content/about.md".to_string(),
            format!(
                r#"---
title: "Über {title}"
subtitle: "Speaker & Berater"
image: images/about.jpg
imageAlt: "Portrait"
---

Hier steht die Geschichte hinter der Marke. **Markdown** wird zu HTML.
"#
            ),
        ),
        (
            "content/testimonials/example.md".to_string(),
            r#"---
author: Erika Mustermann
position: Geschäftsführerin
company: Beispiel GmbH
order: 1
---

Ein inspirierender Vortrag, der lange nachwirkt.
"#
            .to_string(),
        ),
        (
            "content/press/example.md".to_string(),
            r#"---
title: Interview über Leadership
date: 2024-03-05
publication: Beispiel Zeitung
link: https://example.com/interview
---

Ein ausführliches Gespräch über Führung in unsicheren Zeiten.
"#
            .to_string(),
        ),
        (
            "content/logos/example.md".to_string(),
            r#"---
name: Beispiel GmbH
logo: images/logos/beispiel.svg
url: https://example.com
order: 1
---
"#
            .to_string(),
        ),
        (
            "content/seo/home.md".to_string(),
            format!(
                r#"---
page: home
title: "{title}"
description: Startseite
keywords: Keynote, Beratung
---
"#
            ),
        ),
        (
            "content/stats.json".to_string(),
            r#"[
  { "platform": "LinkedIn", "value": "12.5k", "suffix": "+", "order": 1 },
  { "platform": "Instagram", "value": 4200, "label": "Follower", "order": 2 }
]
"#
            .to_string(),
        ),
    ];

    for (rel, content) in samples {
        fs::write(base.join(&rel), content).with_context(|| format!("Failed to write {}", rel))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use brand_site_core::config::parse_site_toml_str;
    use brand_site_core::load_site_config;
    use brand_site_validator::validate_project;
    use tempfile::TempDir;

    #[test]
    fn test_site_name_from_dir() {
        assert_eq!(site_name_from_dir(Path::new("/tmp/jane-doe")), "Jane Doe");
        assert_eq!(site_name_from_dir(Path::new("max_power site")), "Max Power Site");
        assert_eq!(site_name_from_dir(Path::new("/")), "Personal Brand");
    }

    #[test]
    fn test_toml_escape_string() {
        assert_eq!(toml_escape_string(r#"Test "Quote""#), r#"Test \"Quote\""#);
        assert_eq!(toml_escape_string(r"Test\Back"), r"Test\\Back");
        assert_eq!(toml_escape_string("Test\nNewline"), r"Test\nNewline");
    }

    #[test]
    fn test_generated_site_toml_parses() {
        let dir = TempDir::new().unwrap();
        generate_site_toml(dir.path(), r#"The "Best" \ Brand"#).unwrap();

        let content = fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap();
        let config = parse_site_toml_str(&content, dir.path()).unwrap();
        assert_eq!(config.defaults.site_name, r#"The "Best" \ Brand"#);
        assert_eq!(config.feed.api_limit, 10);
        assert_eq!(config.feed.cache_limit, 20);
    }

    #[test]
    fn test_init_creates_structure() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("jane-doe");
        run(project.clone()).unwrap();

        assert!(project.join("site.toml").is_file());
        assert!(project.join("public/data").is_dir());
        for sample in [
            "content/about.md",
            "content/testimonials/example.md",
            "content/press/example.md",
            "content/logos/example.md",
            "content/seo/home.md",
            "content/stats.json",
        ] {
            assert!(project.join(sample).is_file(), "missing {}", sample);
        }
    }

    #[test]
    fn test_init_refuses_existing_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "").unwrap();
        assert!(run(dir.path().to_path_buf()).is_err());
    }

    #[test]
    fn test_scaffold_validates_without_errors() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("jane-doe");
        run(project.clone()).unwrap();

        let config = load_site_config(&project).unwrap();
        let report = validate_project(&config);
        assert!(report.errors.is_empty(), "{:?}", report.errors);
        assert!(report.info.iter().any(|i| i == "testimonials: 1 item(s)"));
        assert!(report.info.iter().any(|i| i == "stats: 2 item(s)"));
    }
}
