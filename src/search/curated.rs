//! Curated public lists drawn from the partner and testimonial stores.

use crate::domain::error::Result;
use crate::domain::{Partner, Testimonial};
use crate::store::Repository;

/// Partners flagged `featured`, in insertion order.
///
/// # Errors
///
/// Propagates any repository failure.
pub async fn featured_partners(repo: &dyn Repository<Partner>) -> Result<Vec<Partner>> {
    let partners = repo.get_all().await?;
    Ok(partners.into_iter().filter(|p| p.featured).collect())
}

/// Testimonials that passed moderation, in insertion order.
///
/// # Errors
///
/// Propagates any repository failure.
pub async fn approved_testimonials(repo: &dyn Repository<Testimonial>) -> Result<Vec<Testimonial>> {
    let testimonials = repo.get_all().await?;
    Ok(testimonials.into_iter().filter(|t| t.approved).collect())
}
