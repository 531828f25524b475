//! Набор универсальных макросов для приложений Duka.
use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DataStruct, DeriveInput, Fields, LitStr, parse_macro_input};

/// Макрос `RowDisplay` генерирует для структуры реализацию `Display`:
/// значения всех именованных полей в порядке объявления, разделённые `|`.
///
/// Используется для компактной записи товаров и продаж в log-файл.
///
/// ## Пример
///
/// ```ignore
/// use macros::RowDisplay;
///
/// #[derive(RowDisplay)]
/// struct Product {
///     id: u64,
///     name: String,
/// }
///
/// let p = Product { id: 1, name: "Soap".into() };
/// assert_eq!(p.to_string(), "1|Soap");
/// ```
#[proc_macro_derive(RowDisplay)]
pub fn derive_row_display(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let struct_name = &input.ident;

    // Сбор названия полей.
    let fields_name = match &input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(fields),
            ..
        }) => &fields.named,
        _ => panic!("RowDisplay допустимо использовать только со структурами"),
    };

    let fields: Vec<_> = fields_name
        .iter()
        .filter_map(|field| field.ident.as_ref())
        .collect();

    // Формат для Display: "{}|{}|{}"
    let fmt_string = vec!["{}"; fields.len()].join("|");
    let fmt_lit = LitStr::new(&fmt_string, proc_macro2::Span::call_site());

    let output = quote! {
        impl std::fmt::Display for #struct_name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(
                    f,
                    #fmt_lit,
                    #(self.#fields),*
                )
            }
        }
    };

    TokenStream::from(output)
}

/// Derive-макрос `LabelDisplay` для enum из unit-вариантов: реализует
/// [`std::fmt::Display`], выводя подпись варианта.
///
/// Подпись задаётся атрибутом `#[label("...")]`. Без атрибута имя варианта
/// разбивается по заглавным буквам и приводится к нижнему регистру:
/// `SellingPrice` выводится как `selling price`.
///
/// ## Пример
///
/// ```ignore
/// use macros::LabelDisplay;
///
/// #[derive(LabelDisplay)]
/// enum ProductField {
///     #[label("name")]
///     Name,
///     SellingPrice,
/// }
///
/// assert_eq!(ProductField::SellingPrice.to_string(), "selling price");
/// ```
#[proc_macro_derive(LabelDisplay, attributes(label))]
pub fn derive_label_display(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_label_display(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_label_display(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            name,
            "LabelDisplay применим только к enum",
        ));
    };

    let mut arms = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "LabelDisplay поддерживает только варианты без полей",
            ));
        }
        let ident = &variant.ident;
        let label = match variant.attrs.iter().find(|a| a.path().is_ident("label")) {
            Some(attr) => attr.parse_args::<LitStr>()?.value(),
            None => split_camel_case(&ident.to_string()),
        };
        arms.push(quote! { Self::#ident => f.write_str(#label), });
    }

    Ok(quote! {
        impl std::fmt::Display for #name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self { #(#arms)* }
            }
        }
    })
}

/// `BuyingPrice` -> `buying price`.
fn split_camel_case(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, ch) in ident.chars().enumerate() {
        if ch.is_uppercase() && i > 0 {
            out.push(' ');
        }
        out.extend(ch.to_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_becomes_words() {
        assert_eq!(split_camel_case("BuyingPrice"), "buying price");
        assert_eq!(split_camel_case("Name"), "name");
    }

    #[test]
    fn label_attribute_overrides_variant_name() {
        let input: DeriveInput = syn::parse_quote! {
            enum Field {
                #[label("quantity")]
                Stock,
                SellingPrice,
            }
        };
        let code = expand_label_display(&input).unwrap().to_string();

        assert!(code.contains("\"quantity\""));
        assert!(code.contains("\"selling price\""));
        assert!(!code.contains("\"stock\""));
    }

    #[test]
    fn struct_input_is_compile_error() {
        let input: DeriveInput = syn::parse_quote! {
            struct Field { id: u64 }
        };
        assert!(expand_label_display(&input).is_err());
    }
}
