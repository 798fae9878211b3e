//! Text formatters the rendering stage applies inside templates.
//!
//! The set is fixed; [`register_filters`] installs all of them on a
//! `minijinja` environment.

use heck::ToUpperCamelCase;
use minijinja::Environment;

use super::identifier::IdentifierFormatter;

/// Wrap `fragment` in an indented `/** ... */` doc block.
pub fn javadoc(fragment: &str) -> String {
    let mut doc = String::from("  /**\n");
    for line in fragment.lines() {
        doc.push_str("   * ");
        doc.push_str(line);
        doc.push('\n');
    }
    doc.push_str("   */\n");
    doc
}

/// Uppercase the first character.
pub fn capitalize(fragment: &str) -> String {
    let mut chars = fragment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn camelize(fragment: &str) -> String {
    fragment.to_upper_camel_case()
}

/// Replace a JSON decode of a `File` response with a download to a temp file.
pub fn handle_download(fragment: &str) -> String {
    if fragment == "asJson[File]" {
        "asFile(File.createTempFile(\"download\", \".tmp\")).mapLeft(errStr => DeserializationException(errStr, new Exception(errStr)))".to_string()
    } else {
        fragment.to_string()
    }
}

/// Register every formatter as a filter: `javadoc`, `capitalize`, `camelize`,
/// `enum_entry`, `codec_name` and `handle_download`.
pub fn register_filters(env: &mut Environment<'_>, formatter: &IdentifierFormatter) {
    env.add_filter("javadoc", |value: String| javadoc(&value));
    env.add_filter("capitalize", |value: String| capitalize(&value));
    env.add_filter("camelize", |value: String| camelize(&value));
    env.add_filter("handle_download", |value: String| handle_download(&value));

    let entries = formatter.clone();
    env.add_filter("enum_entry", move |value: String| {
        entries.enum_entry_name(&value)
    });
    let codecs = formatter.clone();
    env.add_filter("codec_name", move |value: String| codecs.codec_name(&value));
}

#[cfg(test)]
mod tests {
    use minijinja::context;

    use super::*;

    fn env() -> Environment<'static> {
        let mut env = Environment::new();
        register_filters(&mut env, &IdentifierFormatter::default());
        env
    }

    #[test]
    fn test_javadoc_block() {
        assert_eq!(
            javadoc("Find a pet.\nReturns one pet."),
            "  /**\n   * Find a pet.\n   * Returns one pet.\n   */\n"
        );
    }

    #[test]
    fn test_handle_download() {
        assert!(handle_download("asJson[File]").starts_with("asFile("));
        assert_eq!(handle_download("asJson[Pet]"), "asJson[Pet]");
    }

    #[test]
    fn test_filters_render() {
        let env = env();
        let rendered = env
            .render_str(
                "{{ t | codec_name }} {{ e | enum_entry }} {{ b | enum_entry }} {{ n | camelize }} {{ c | capitalize }}",
                context! {
                    t => "Seq[Pet]",
                    e => "sold-out",
                    b => "",
                    n => "pet_store",
                    c => "pets",
                },
            )
            .unwrap();
        assert_eq!(rendered, "seqPetCodec SoldOut NotPresent PetStore Pets");
    }
}
