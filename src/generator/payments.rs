use anyhow::Context;
use askama::Template;

use super::templates::{
    PaymentsClientTemplateData, PaymentsConfigTemplateData, PaymentsWebhookTemplate,
};
use crate::ir::{Product, ProductKind};

/// Checkout mode used by `createCheckoutSession` when none is passed.
pub fn default_checkout_mode(products: &[Product]) -> &'static str {
    if products.iter().any(|p| p.kind == ProductKind::Subscription) {
        "subscription"
    } else {
        "payment"
    }
}

/// Render `src/lib/stripe.ts`.
pub fn render_payments_client(products: &[Product]) -> anyhow::Result<String> {
    let rendered = PaymentsClientTemplateData {
        default_mode: default_checkout_mode(products).to_string(),
    }
    .render()?;
    Ok(rendered)
}

/// Render the Stripe webhook route handler.
pub fn render_payments_webhook() -> anyhow::Result<String> {
    Ok(PaymentsWebhookTemplate.render()?)
}

/// Render `src/config/stripe.ts`, the product list serialised as-is.
pub fn render_payments_config(products: &[Product]) -> anyhow::Result<String> {
    let products_json =
        serde_json::to_string_pretty(products).context("Failed to serialise products")?;
    Ok(PaymentsConfigTemplateData { products_json }.render()?)
}
