use std::sync::OnceLock;

use regex::Regex;

/// Compile a pattern that is a literal in this crate.
pub(crate) fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex literal")
}

pub(crate) fn regex_source_extension() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"\.(tsx?|jsx?)$"))
}

pub(crate) fn regex_catch_all_segment() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"\[\.\.\.(\w+)\]"))
}

pub(crate) fn regex_dynamic_segment() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"\[(\w+)\]"))
}

pub(crate) fn regex_api_method() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"\breq(?:uest)?\.method\s*===\s*['"](\w+)['"]"#))
}

pub(crate) fn regex_event_handler_name() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"^on[A-Z]"))
}

pub(crate) fn regex_revalidate_key() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"revalidate\s*:"))
}

pub(crate) fn regex_revalidate_value() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"revalidate\s*:\s*(\d+)"))
}

/// Control-flow shapes that make a `getStaticProps` body non-trivial to port.
pub(crate) fn regex_complex_body() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        [
            r"try\s*\{",
            r"catch\s*\(",
            r"if\s*\(",
            r"switch\s*\(",
            r"\.then\s*\(",
        ]
        .into_iter()
        .map(regex)
        .collect()
    })
}

pub(crate) fn regex_request_context() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"cookies|headers|redirect"))
}

pub(crate) fn regex_data_source() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"(?i)fetch|axios|prisma|query|request|api"))
}

/// Tokens that only make sense in a client component.
pub(crate) fn regex_client_only_tokens() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        [
            r"\buseState\b",
            r"\buseEffect\b",
            r"\buseRef\b",
            r"\bonClick\b",
            r"\bonChange\b",
            r"\bonSubmit\b",
        ]
        .into_iter()
        .map(regex)
        .collect()
    })
}
