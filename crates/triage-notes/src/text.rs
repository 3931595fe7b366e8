/// Title-case a phrase: the first letter of every alphabetic run is
/// uppercased and the rest lowercased, so `"htn and dm"` becomes
/// `"Htn And Dm"` and `"a-fib"` becomes `"A-Fib"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
