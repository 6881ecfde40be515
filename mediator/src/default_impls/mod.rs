/// Provides a default implementation of the `Mediator` trait.
pub(crate) mod mediator_impl;
