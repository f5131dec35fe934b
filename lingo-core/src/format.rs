/// Substitutes positional `{0}`, `{1}`, ... placeholders.
///
/// Arguments are applied in order and each replaces only the first
/// occurrence of its token, so a later argument may match text produced by
/// an earlier one. Tokens without a matching argument are left in place.
pub fn format_positional(template: &str, args: &[&str]) -> String {
    args.iter()
        .enumerate()
        .fold(template.to_string(), |acc, (i, arg)| {
            acc.replacen(&format!("{{{i}}}"), arg, 1)
        })
}
