// show feature flags in the generated documentation
// https://doc.rust-lang.org/rustdoc/unstable-features.html#extensions-to-the-doc-attribute
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Integrations with LLM providers.
//!
//! Every integration implements [`colloquy_core::LlmService`] and exposes a `register` function
//! that adds its factories to a [`colloquy_core::ServiceRegistry`].

#[cfg(feature = "openai")]
pub mod openai;

/// Registers every enabled integration
#[allow(unused_variables)]
pub fn register_all(registry: &mut colloquy_core::ServiceRegistry) {
    #[cfg(feature = "openai")]
    openai::register(registry);
}
