//! Public content: blog posts managed from the back-office and static guides.

pub mod blog;
pub mod guides;
