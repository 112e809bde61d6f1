//! One module per content type: typed frontmatter, normalization and
//! assembly into a frontend-ready collection.

pub mod about;
pub mod feed;
pub mod logos;
pub mod press;
pub mod seo;
pub mod stats;
pub mod testimonials;
