use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenStream as TokenStream2};
use proc_macro_crate::{FoundCrate, crate_name};
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

#[proc_macro_derive(FormRecord)]
pub fn derive_form_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let record_ident = input.ident;

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &record_ident,
            "FormRecord derive currently supports only non-generic structs",
        )
        .to_compile_error()
        .into();
    }

    let named_fields = match input.data {
        Data::Struct(data) => match data.fields {
            Fields::Named(fields) => fields.named,
            _ => {
                return syn::Error::new_spanned(
                    &record_ident,
                    "FormRecord derive requires a struct with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(
                &record_ident,
                "FormRecord derive is only supported on structs",
            )
            .to_compile_error()
            .into();
        }
    };

    let calmform = calmform_path();
    let mut decoders = Vec::new();
    let mut field_names = Vec::new();

    for field in named_fields {
        let Some(field_ident) = field.ident else {
            continue;
        };
        let field_ty = field.ty;
        let field_name = field_ident.unraw().to_string();

        decoders.push(quote! {
            #field_ident: #calmform::value::decode_field::<#field_ty>(values, #field_name)?
        });
        field_names.push(field_name);
    }

    quote! {
        impl #calmform::value::FromFormValues for #record_ident {
            fn from_form_values(
                values: &#calmform::value::FormValues,
            ) -> ::core::result::Result<Self, #calmform::value::RecordError> {
                ::core::result::Result::Ok(Self {
                    #(#decoders,)*
                })
            }
        }

        impl #record_ident {
            pub const FIELD_NAMES: &'static [&'static str] = &[#(#field_names),*];

            pub fn field_names() -> &'static [&'static str] {
                Self::FIELD_NAMES
            }
        }
    }
    .into()
}

fn calmform_path() -> TokenStream2 {
    match crate_name("calmform") {
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(::#ident)
        }
        Ok(FoundCrate::Itself) => quote!(crate),
        Err(_) => quote!(::calmform),
    }
}
