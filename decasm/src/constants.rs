use once_cell::sync::OnceCell;
use regex::Regex;

pub static LINE_REGEX: OnceCell<Regex> = OnceCell::new();
static LINE_REGEX_PATTERN: &str =
    r"^(?:(?P<label>\S+)|\s)\s*(?P<opcode>\S+)?(?:\s+(?P<operand>\S+))?(?:\s+(?P<extra>\S+))?";

pub fn line_regex() -> &'static Regex {
    LINE_REGEX.get_or_init(|| Regex::new(LINE_REGEX_PATTERN).expect("Invalid line regex"))
}
