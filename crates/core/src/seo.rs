//! SEO artifacts: sitemap, robots.txt and JSON-LD structured data.
//!
//! All builders are pure functions of the public base URL and the live
//! skill set. Skill slugs are restricted to `[a-z0-9-]`, so URLs can be
//! interpolated into XML and JSON without escaping.

use serde_json::{Value, json};
use skilldir_types::entities::Skill;

/// Canonical URL of a skill detail page
pub fn skill_url(public_url: &str, slug: &str) -> String {
    format!("{public_url}/skills/{slug}")
}

/// Render the XML sitemap: landing page, listing page, and every live skill
///
/// `lastmod` uses the skill's `updated_at` date so crawlers re-fetch
/// recently changed detail pages first.
pub fn sitemap_xml(public_url: &str, skills: &[Skill]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    xml.push_str(&format!("  <url><loc>{public_url}/</loc></url>\n"));
    xml.push_str(&format!("  <url><loc>{public_url}/skills</loc></url>\n"));

    for skill in skills {
        xml.push_str(&format!(
            "  <url><loc>{loc}</loc><lastmod>{lastmod}</lastmod></url>\n",
            loc = skill_url(public_url, &skill.slug),
            lastmod = skill.updated_at.format("%Y-%m-%d"),
        ));
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Render robots.txt: allow everything, point at the sitemap
pub fn robots_txt(public_url: &str) -> String {
    format!(
        "User-agent: *\n\
         Allow: /\n\
         \n\
         Sitemap: {public_url}/sitemap.xml\n"
    )
}

/// JSON-LD `SoftwareApplication` for a skill detail page
pub fn skill_jsonld(public_url: &str, skill: &Skill) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "SoftwareApplication",
        "name": skill.name,
        "description": skill.summary,
        "url": skill_url(public_url, &skill.slug),
        "applicationCategory": "DeveloperApplication",
        "operatingSystem": "Any",
        "keywords": skill.tags,
        "interactionStatistic": {
            "@type": "InteractionCounter",
            "interactionType": "https://schema.org/InstallAction",
            "userInteractionCount": skill.install_count,
        },
    })
}

/// JSON-LD `ItemList` for the listing page
pub fn skill_list_jsonld(public_url: &str, skills: &[Skill]) -> Value {
    let elements: Vec<Value> = skills
        .iter()
        .enumerate()
        .map(|(index, skill)| {
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "name": skill.name,
                "url": skill_url(public_url, &skill.slug),
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "ItemList",
        "itemListElement": elements,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use skilldir_types::entities::SkillCategory;

    use super::*;

    const BASE: &str = "https://skilldir.dev";

    fn test_skill(slug: &str, installs: i64) -> Skill {
        let mut skill = Skill::builder()
            .id(1)
            .slug(slug)
            .name("Contract Checker")
            .summary("Validates API contracts")
            .description("Checks responses against OpenAPI schemas.")
            .category(SkillCategory::ApiTesting)
            .tags(vec!["api".to_string(), "contracts".to_string()])
            .author_id(1)
            .create()
            .unwrap();
        skill.install_count = installs;
        skill
    }

    #[test]
    fn test_sitemap_lists_static_pages_and_skills() {
        let skills = vec![test_skill("contract-checker", 3)];
        let xml = sitemap_xml(BASE, &skills);

        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("<loc>https://skilldir.dev/</loc>"));
        assert!(xml.contains("<loc>https://skilldir.dev/skills</loc>"));
        assert!(xml.contains("<loc>https://skilldir.dev/skills/contract-checker</loc>"));
        assert!(xml.contains("<lastmod>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn test_robots_points_at_sitemap() {
        let robots = robots_txt(BASE);
        assert!(robots.contains("User-agent: *"));
        assert!(robots.contains("Allow: /"));
        assert!(robots.contains("Sitemap: https://skilldir.dev/sitemap.xml"));
    }

    #[test]
    fn test_skill_jsonld_shape() {
        let value = skill_jsonld(BASE, &test_skill("contract-checker", 7));

        assert_eq!(value["@type"], "SoftwareApplication");
        assert_eq!(value["name"], "Contract Checker");
        assert_eq!(value["url"], "https://skilldir.dev/skills/contract-checker");
        assert_eq!(value["interactionStatistic"]["userInteractionCount"], 7);
    }

    #[test]
    fn test_list_jsonld_positions_are_one_based() {
        let skills = vec![test_skill("a-skill", 1), test_skill("b-skill", 2)];
        let value = skill_list_jsonld(BASE, &skills);

        let elements = value["itemListElement"].as_array().unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0]["position"], 1);
        assert_eq!(elements[1]["position"], 2);
        assert_eq!(elements[1]["url"], "https://skilldir.dev/skills/b-skill");
    }
}
