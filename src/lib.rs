//! Fetches landscape dataset fragments, joins organization and repository
//! metadata into self-contained items, and caches the result per
//! classification view (`category_networking`, `maturity_graduated`, ...).
//!
//! [`app::App`] is the entry point: it resolves the dataset URL through a
//! [`locator::ResourceLocator`], fetches it with a [`source::BundleSource`],
//! joins it with [`join::enrich`], stores it in a shared
//! [`cache::DatasetCache`] and reports the outcome to a
//! [`observer::LoadObserver`].

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod join;
pub mod locator;
pub mod observer;
pub mod output;
pub mod source;
