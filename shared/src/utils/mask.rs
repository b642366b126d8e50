//! Log-safe masking of recipient identifiers

/// Number of trailing characters left visible
const VISIBLE_CHARS: usize = 4;

/// Mask a recipient identifier for logging
///
/// Shows only the last 4 characters. A leading `+` (phone numbers) or `@`
/// (usernames) is kept so the identifier kind stays recognizable.
///
/// # Example
///
/// ```
/// use vg_shared::mask_recipient;
///
/// assert_eq!(mask_recipient("+15555550100"), "+*******0100");
/// assert_eq!(mask_recipient("@alice_smith"), "@*******mith");
/// assert_eq!(mask_recipient("42"), "**");
/// ```
pub fn mask_recipient(recipient: &str) -> String {
    let chars: Vec<char> = recipient.chars().collect();
    let (prefix, body) = match chars.first() {
        Some(c @ ('+' | '@')) => (Some(*c), &chars[1..]),
        _ => (None, &chars[..]),
    };

    if body.len() <= VISIBLE_CHARS {
        let masked = "*".repeat(body.len());
        return match prefix {
            Some(p) => format!("{}{}", p, masked),
            None => masked,
        };
    }

    let hidden = body.len() - VISIBLE_CHARS;
    let tail: String = body[hidden..].iter().collect();
    let mut out = String::with_capacity(recipient.len());
    if let Some(p) = prefix {
        out.push(p);
    }
    out.push_str(&"*".repeat(hidden));
    out.push_str(&tail);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_numeric_chat_id() {
        assert_eq!(mask_recipient("123456789"), "*****6789");
    }

    #[test]
    fn test_mask_short_values() {
        assert_eq!(mask_recipient(""), "");
        assert_eq!(mask_recipient("@bob"), "@***");
        assert_eq!(mask_recipient("+1234"), "+****");
    }

    #[test]
    fn test_mask_multibyte() {
        assert_eq!(mask_recipient("пользователь"), "********тель");
    }
}
