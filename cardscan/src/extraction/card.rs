use std::sync::LazyLock;

use regex::Regex;

use super::types::ExtractedInfo;

// Character classes are spelled out in ASCII so that `\w`/`\d` do not pick up
// non-Latin digits and letters.
//
// Whitespace is the Unicode space set plus the BOM (U+FEFF), without NEL
// (U+0085). `SPACE_CHARS` and `is_space` must agree.
const SPACE_CHARS: &str =
    r"\t-\r \xA0\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

static RE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_.-]+@[A-Za-z0-9_.-]+").unwrap());
pub(super) static RE_TEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(\+?[0-9]{{1,3}}[{s}-]?)?(\(?[0-9]{{3}}\)?[{s}-]?)?[0-9]{{2,4}}[{s}-]?[0-9]{{2,4}}[{s}-]?[0-9]{{2,4}}",
        s = SPACE_CHARS
    ))
    .unwrap()
});
static RE_WEB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?:www\.|https?://)[^{SPACE_CHARS}]+")).unwrap()
});

const NAME_MIN_TOKENS: usize = 2;
const NAME_MAX_TOKENS: usize = 4;

/// Extract contact fields from OCR text.
///
/// Each pattern takes its first match anywhere in `text`; the name is the
/// first line that looks like a short run of words. Never fails: text with no
/// recognisable content yields [`ExtractedInfo::default`].
pub fn extract_info_from_text(text: &str) -> ExtractedInfo {
    ExtractedInfo {
        name: find_name(text),
        title: None,
        tel: first_match(&RE_TEL, text),
        company: None,
        email: first_match(&RE_EMAIL, text),
        address: None,
        web: first_match(&RE_WEB, text),
    }
}

fn first_match(re: &Regex, text: &str) -> Option<String> {
    re.find(text).map(|m| m.as_str().to_string())
}

fn find_name(text: &str) -> Option<String> {
    text.split('\n')
        .map(|line| line.trim_matches(is_space))
        .find(|line| looks_like_name(line))
        .map(str::to_string)
}

fn is_space(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

/// Tokens are counted on single spaces, so a doubled space inside a line adds
/// an empty token.
fn looks_like_name(line: &str) -> bool {
    if line.is_empty()
        || line.contains('@')
        || line.contains("www")
        || line.contains(".com")
        || line.chars().any(|c| c.is_ascii_digit())
    {
        return false;
    }

    let tokens = line.split(' ').count();
    (NAME_MIN_TOKENS..=NAME_MAX_TOKENS).contains(&tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extracts_full_card() {
        let text = "John Smith\nAcme Corp\njohn@acme.com\n+1 555-123-4567\nwww.acme.com";
        let info = extract_info_from_text(text);

        assert_eq!(
            info,
            ExtractedInfo {
                name: Some("John Smith".to_string()),
                title: None,
                tel: Some("+1 555-123-4567".to_string()),
                company: None,
                email: Some("john@acme.com".to_string()),
                address: None,
                web: Some("www.acme.com".to_string()),
            }
        );
    }

    #[test]
    fn test_empty_text_yields_empty_record() {
        assert!(extract_info_from_text("").is_empty());
        assert!(extract_info_from_text("\n\n   \n").is_empty());
    }

    #[test]
    fn test_email_is_first_token() {
        let info = extract_info_from_text("mail: first.last@example.co.uk or other@x.io");
        assert_eq!(info.email.as_deref(), Some("first.last@example.co.uk"));
    }

    #[test]
    fn test_no_at_sign_means_no_email() {
        let info = extract_info_from_text("Jane Doe\nexample.com\n555 1234 5678");
        assert!(info.email.is_none());
    }

    #[test]
    fn test_email_requires_ascii_domain() {
        let info = extract_info_from_text("contact: şule@örnek.com");
        assert!(info.email.is_none());

        let info = extract_info_from_text("contact: şule@ornek.com");
        assert_eq!(info.email.as_deref(), Some("ule@ornek.com"));
    }

    #[test]
    fn test_tel_kept_verbatim() {
        let info = extract_info_from_text("Tel: (555) 123-4567");
        assert_eq!(info.tel.as_deref(), Some("(555) 123-4567"));
    }

    #[test]
    fn test_tel_requires_three_digit_groups() {
        let info = extract_info_from_text("Room 12 34");
        assert!(info.tel.is_none());
    }

    #[test]
    fn test_tel_matches_loose_digit_runs() {
        // Postal codes and similar digit runs are picked up too.
        let info = extract_info_from_text("Istanbul 34000 12 34");
        assert_eq!(info.tel.as_deref(), Some("34000 12 34"));
    }

    #[test]
    fn test_web_http_and_www() {
        let info = extract_info_from_text("see https://acme.example/contact?id=1 today");
        assert_eq!(info.web.as_deref(), Some("https://acme.example/contact?id=1"));

        let info = extract_info_from_text("visit www.acme.io\nthanks");
        assert_eq!(info.web.as_deref(), Some("www.acme.io"));
    }

    #[test]
    fn test_name_is_first_qualifying_line() {
        let text = "ACME\n  Jane Q Public  \nSecond Candidate Line";
        let info = extract_info_from_text(text);
        assert_eq!(info.name.as_deref(), Some("Jane Q Public"));
    }

    #[test]
    fn test_name_skips_lines_with_markers_or_digits() {
        let text = "jane@acme.com here\nwww acme site\nacme.com rules\nSuite 400 West\nJane Doe";
        let info = extract_info_from_text(text);
        assert_eq!(info.name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_name_token_bounds() {
        assert!(extract_info_from_text("One").name.is_none());
        assert!(extract_info_from_text("one two three four five").name.is_none());
        assert_eq!(
            extract_info_from_text("one two three four").name.as_deref(),
            Some("one two three four")
        );
    }

    #[test]
    fn test_name_counts_empty_tokens_from_double_spaces() {
        assert_eq!(
            extract_info_from_text("Jane  Doe").name.as_deref(),
            Some("Jane  Doe")
        );
        assert!(extract_info_from_text("A  B  C").name.is_none());
    }

    #[test]
    fn test_name_handles_crlf_lines() {
        let info = extract_info_from_text("Logo\r\nMary Ann Lee\r\n");
        assert_eq!(info.name.as_deref(), Some("Mary Ann Lee"));
    }

    #[test]
    fn test_name_strips_byte_order_mark() {
        let info = extract_info_from_text("\u{feff}Jane Doe\n");
        assert_eq!(info.name.as_deref(), Some("Jane Doe"));

        let info = extract_info_from_text("Jane Doe\u{feff}\u{feff}\nx");
        assert_eq!(info.name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_next_line_is_not_whitespace() {
        let info = extract_info_from_text("\u{85}Jane Doe");
        assert_eq!(info.name.as_deref(), Some("\u{85}Jane Doe"));

        let info = extract_info_from_text("555\u{85}123\u{85}4567");
        assert!(info.tel.is_none());
    }

    #[test]
    fn test_byte_order_mark_separates_tel_and_web() {
        let text = "555\u{feff}123\u{feff}4567";
        assert_eq!(extract_info_from_text(text).tel.as_deref(), Some(text));

        let info = extract_info_from_text("www.acme.com\u{feff}/about");
        assert_eq!(info.web.as_deref(), Some("www.acme.com"));
    }

    #[test]
    fn test_space_set_matches_pattern_class() {
        let class = Regex::new(&format!("^[{SPACE_CHARS}]$")).unwrap();
        for c in (0u32..0x3100).chain([0xfeff]).filter_map(char::from_u32) {
            assert_eq!(
                is_space(c),
                class.is_match(c.encode_utf8(&mut [0; 4])),
                "U+{:04X}",
                c as u32
            );
        }
    }

    #[test]
    fn test_dead_fields_never_populated() {
        let info = extract_info_from_text("CEO\nAcme Corporation Ltd\n42 Main Street, Springfield");
        assert!(info.title.is_none());
        assert!(info.company.is_none());
        assert!(info.address.is_none());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let text = "Ali Veli\nali@veli.dev\n+90 212 555 12 34\nhttp://veli.dev";
        assert_eq!(extract_info_from_text(text), extract_info_from_text(text));
    }
}
