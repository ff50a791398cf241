//! Built-in prompt templates.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Template {
    pub name: &'static str,
    pub slug: &'static str,
    pub description: &'static str,
    pub prompt: &'static str,
}

pub const TEMPLATES: &[Template] = &[
    Template {
        name: "Landing Page",
        slug: "landing-page",
        description: "Modern business landing page with hero section",
        prompt: "Create a modern landing page for a SaaS product with a hero section, features, testimonials, and call-to-action",
    },
    Template {
        name: "Portfolio",
        slug: "portfolio",
        description: "Professional developer portfolio",
        prompt: "Build a clean portfolio website for a web developer with projects showcase, skills, and contact form",
    },
    Template {
        name: "Blog",
        slug: "blog",
        description: "Clean blog layout with articles",
        prompt: "Design a minimalist blog website with article listings, single post view, and sidebar",
    },
    Template {
        name: "Dashboard",
        slug: "dashboard",
        description: "Admin dashboard with charts",
        prompt: "Create a responsive admin dashboard with sidebar navigation, charts, and data tables",
    },
];

/// Find a template by slug or case-insensitive name.
pub fn find_template(key: &str) -> Option<&'static Template> {
    let key = key.trim();
    TEMPLATES
        .iter()
        .find(|t| t.slug == key || t.name.eq_ignore_ascii_case(key))
}
