//! Unit tests for the identity wrappers shared across the GitHub layer.

mod locator;
