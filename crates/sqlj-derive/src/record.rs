//! Record derive macro implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Result};

struct PersistedField<'a> {
    ident: &'a Ident,
    column: String,
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Record can only be derived for structs",
            ));
        }
    };

    let mut persisted = Vec::new();
    let mut row_inits = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        match column_attr(field)? {
            Some(column) => {
                row_inits.push(quote! { #ident: row.try_get_column(#column)? });
                persisted.push(PersistedField { ident, column });
            }
            None => row_inits.push(quote! { #ident: ::std::default::Default::default() }),
        }
    }

    let columns: Vec<&str> = persisted.iter().map(|f| f.column.as_str()).collect();
    let bound_fields: Vec<TokenStream> = persisted
        .iter()
        .map(|f| {
            let ident = f.ident;
            let column = &f.column;
            quote! { sqlj::Field::value(#column, ::std::clone::Clone::clone(&self.#ident)) }
        })
        .collect();

    Ok(quote! {
        impl #impl_generics sqlj::FromRow for #name #ty_generics #where_clause {
            fn from_row(row: &sqlj::tokio_postgres::Row) -> sqlj::DbResult<Self> {
                use sqlj::RowExt;
                Ok(Self {
                    #(#row_inits),*
                })
            }
        }

        impl #impl_generics sqlj::Record for #name #ty_generics #where_clause {
            fn columns() -> &'static [&'static str] {
                &[#(#columns),*]
            }

            fn fields(&self) -> ::std::vec::Vec<sqlj::Field> {
                ::std::vec![#(#bound_fields),*]
            }
        }
    })
}

/// The column named by `#[orm(column = "...")]`, if present.
fn column_attr(field: &syn::Field) -> Result<Option<String>> {
    let mut column = None;
    for attr in &field.attrs {
        if !attr.path().is_ident("orm") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("column") {
                let lit: LitStr = meta.value()?.parse()?;
                if lit.value().is_empty() {
                    return Err(meta.error("column name must not be empty"));
                }
                column = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("unknown orm attribute, expected `column = \"...\"`"))
            }
        })?;
    }
    Ok(column)
}
