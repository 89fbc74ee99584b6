//! Derive macros for Courier messages.
//!
//! - `#[derive(Request)]` with an optional `#[request(response = Type)]`
//! - `#[derive(Notification)]`

use proc_macro::TokenStream;

mod message;

/// Derive macro for implementing `Request`.
///
/// The response type is given with `#[request(response = Type)]`. Without
/// the attribute the response is `courier::Unit`.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Request)]
/// #[request(response = Option<User>)]
/// struct GetUser { id: u64 }
/// ```
#[proc_macro_derive(Request, attributes(request))]
pub fn derive_request(input: TokenStream) -> TokenStream {
    message::derive_request_impl(input)
}

/// Derive macro for implementing `Notification`.
#[proc_macro_derive(Notification)]
pub fn derive_notification(input: TokenStream) -> TokenStream {
    message::derive_notification_impl(input)
}
