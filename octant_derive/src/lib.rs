/// Derive macro generating an implementation of the trait `Position`.
///
/// The struct must have a field named `position` whose type implements `Position`.
#[proc_macro_derive(Position)]
pub fn position_derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let ast = syn::parse(input);

    impl_position(ast).unwrap_or_else(|e| syn::Error::to_compile_error(&e).into())
}

fn impl_position(input: syn::Result<syn::DeriveInput>) -> syn::Result<proc_macro::TokenStream> {
    let mut input = input?;

    let position_ty = match &input.data {
        syn::Data::Struct(data_struct) => get_field("position", data_struct)
            .map(|field| field.ty.clone())
            .ok_or_else(|| syn::Error::new_spanned(&data_struct.fields, "no `position` field")),
        syn::Data::Enum(enum_data) => Err(syn::Error::new_spanned(
            enum_data.enum_token,
            "the `Position` trait can only be derived for struct types",
        )),
        syn::Data::Union(union_data) => Err(syn::Error::new_spanned(
            union_data.union_token,
            "the `Position` trait can only be derived for struct types",
        )),
    }?;

    input
        .generics
        .make_where_clause()
        .predicates
        .push(syn::parse_quote! {
            #position_ty: ::octant::position::Position
        });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let name = &input.ident;

    Ok(quote::quote! {
        impl #impl_generics ::octant::position::Position for #name #ty_generics #where_clause {
            type Scalar = <#position_ty as ::octant::position::Position>::Scalar;

            #[inline]
            fn coordinates(&self) -> [Self::Scalar; 3] {
                ::octant::position::Position::coordinates(&self.position)
            }
        }
    }
    .into())
}

fn get_field<'a>(name: &str, data_struct: &'a syn::DataStruct) -> Option<&'a syn::Field> {
    data_struct
        .fields
        .iter()
        .find(|field| field.ident.as_ref().is_some_and(|ident| ident == name))
}
