//! Message-related derives.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Attribute, DeriveInput, Ident, Token, Type,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

/// Arguments of the `#[request(...)]` attribute.
struct RequestArgs {
    response: Option<Type>,
}

impl Parse for RequestArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut response = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "response" => {
                    if response.is_some() {
                        return Err(syn::Error::new(
                            ident.span(),
                            "duplicate `response` argument",
                        ));
                    }
                    let ty: Type = input.parse()?;
                    response = Some(ty);
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(RequestArgs { response })
    }
}

fn request_args(attrs: &[Attribute]) -> syn::Result<RequestArgs> {
    let mut args = RequestArgs { response: None };
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("request")) {
        let parsed: RequestArgs = attr.parse_args()?;
        if parsed.response.is_some() {
            if args.response.is_some() {
                return Err(syn::Error::new_spanned(attr, "duplicate `response` argument"));
            }
            args.response = parsed.response;
        }
    }
    Ok(args)
}

/// Implementation of `#[derive(Request)]`.
pub fn derive_request_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let args = match request_args(&input.attrs) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error().into(),
    };

    let response: TokenStream2 = match args.response {
        Some(ty) => quote! { #ty },
        None => quote! { ::courier::Unit },
    };

    let expanded = quote! {
        impl #impl_generics ::courier::Request for #name #ty_generics #where_clause {
            type Response = #response;
        }
    };

    TokenStream::from(expanded)
}

/// Implementation of `#[derive(Notification)]`.
pub fn derive_notification_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::courier::Notification for #name #ty_generics #where_clause {}
    };

    TokenStream::from(expanded)
}
