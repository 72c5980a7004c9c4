//! Tests for type inspection helpers.

use super::super::*;
use rstest::rstest;
use syn::{Type, parse_quote};

#[rstest]
#[case::string(parse_quote!(String), true)]
#[case::qualified_string(parse_quote!(std::string::String), true)]
#[case::static_str(parse_quote!(&'static str), true)]
#[case::borrowed_str(parse_quote!(&'a str), true)]
#[case::cow(parse_quote!(Cow<'static, str>), true)]
#[case::qualified_cow(parse_quote!(std::borrow::Cow<'_, str>), true)]
#[case::mut_str(parse_quote!(&'a mut str), false)]
#[case::option_string(parse_quote!(Option<String>), false)]
#[case::cow_bytes(parse_quote!(Cow<'static, [u8]>), false)]
#[case::integer(parse_quote!(u32), false)]
fn recognises_help_text_types(#[case] ty: Type, #[case] expected: bool) {
    assert_eq!(is_help_text_type(&ty), expected);
}

#[rstest]
#[case::plain(parse_quote!(u32), "u32")]
#[case::map(parse_quote!(HashMap<String, i32>), "HashMap<String, i32>")]
#[case::nested(parse_quote!(Option<Box<dyn Any>>), "Option<Box<dyn Any>>")]
#[case::path(parse_quote!(std::time::Duration), "std::time::Duration")]
#[case::reference(parse_quote!(&'static str), "&'static str")]
#[case::array(parse_quote!([u8; 4]), "[u8; 4]")]
#[case::tuple(parse_quote!((u8, String)), "(u8, String)")]
fn renders_type_labels(#[case] ty: Type, #[case] expected: &str) {
    assert_eq!(type_label(&ty), expected);
}
