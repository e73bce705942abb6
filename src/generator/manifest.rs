use anyhow::Context;
use askama::Template;
use serde_json::json;

use super::templates::{
    EndpointDoc, EnvTemplateData, EnvVar, PrismaClientTemplate, ReadmeTemplateData, TableDoc,
};
use crate::ir::BackendStructure;

/// Every environment variable the generated project reads, with its example value.
///
/// Both the README and `.env.example` are rendered from this list.
pub const ENV_VARS: &[(&str, &str)] = &[
    ("DATABASE_URL", "\"file:./dev.db\""),
    ("NEXT_PUBLIC_APP_URL", "\"http://localhost:3000\""),
    ("NEXT_PUBLIC_CLERK_PUBLISHABLE_KEY", "\"\""),
    ("CLERK_SECRET_KEY", "\"\""),
    ("CLERK_WEBHOOK_SECRET", "\"\""),
    ("STRIPE_SECRET_KEY", "\"\""),
    ("STRIPE_WEBHOOK_SECRET", "\"\""),
];

fn env_vars() -> Vec<EnvVar> {
    ENV_VARS
        .iter()
        .map(|(name, example)| EnvVar {
            name: (*name).to_string(),
            example: (*example).to_string(),
        })
        .collect()
}

/// Render `package.json` for the fixed stack.
pub fn render_package_json(name: &str, version: &str) -> anyhow::Result<String> {
    let manifest = json!({
        "name": name,
        "version": version,
        "private": true,
        "scripts": {
            "dev": "next dev",
            "build": "next build",
            "start": "next start",
            "lint": "next lint",
            "db:push": "prisma db push",
            "db:studio": "prisma studio"
        },
        "dependencies": {
            "@clerk/nextjs": "^4.0.0",
            "@prisma/client": "^5.0.0",
            "@stripe/stripe-js": "^2.0.0",
            "express": "^4.18.0",
            "next": "^14.0.0",
            "react": "^18.0.0",
            "react-dom": "^18.0.0",
            "stripe": "^14.0.0",
            "svix": "^1.0.0",
            "zod": "^3.0.0"
        },
        "devDependencies": {
            "@types/express": "^4.17.0",
            "@types/node": "^20.0.0",
            "@types/react": "^18.0.0",
            "@types/react-dom": "^18.0.0",
            "prisma": "^5.0.0",
            "typescript": "^5.0.0"
        }
    });
    let mut out =
        serde_json::to_string_pretty(&manifest).context("Failed to serialise package.json")?;
    out.push('\n');
    Ok(out)
}

/// Render the project README: setup, environment, endpoints and tables.
pub fn render_readme(name: &str, structure: &BackendStructure) -> anyhow::Result<String> {
    let data = ReadmeTemplateData {
        name: name.to_string(),
        env_vars: env_vars(),
        endpoints: structure
            .api
            .endpoints
            .iter()
            .map(|e| EndpointDoc {
                method: e.method.to_string(),
                path: e.path.clone(),
                authentication: e.authentication,
                description: e.description.clone(),
            })
            .collect(),
        tables: structure
            .database
            .tables
            .iter()
            .map(|t| TableDoc {
                name: t.name.clone(),
                fields: t
                    .fields
                    .iter()
                    .map(|f| format!("{}: {}", f.name, f.ty))
                    .collect(),
            })
            .collect(),
    };
    Ok(data.render()?)
}

/// Render `.env.example`.
pub fn render_env_template() -> anyhow::Result<String> {
    Ok(EnvTemplateData {
        env_vars: env_vars(),
    }
    .render()?)
}

/// Render `src/lib/prisma.ts`, the client every route module imports.
pub fn render_prisma_client() -> anyhow::Result<String> {
    Ok(PrismaClientTemplate.render()?)
}
