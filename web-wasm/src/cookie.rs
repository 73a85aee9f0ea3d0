//! CSRFトークン用のcookie読み出し

use wasm_bindgen::JsCast;

/// document.cookie から名前一致のcookie値を取り出してデコードする
pub fn get_cookie(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let html_document: web_sys::HtmlDocument = document.dyn_into().ok()?;
    let cookies = html_document.cookie().ok()?;
    let raw = find_cookie(&cookies, name)?.to_string();
    match js_sys::decode_uri_component(&raw) {
        Ok(decoded) => Some(String::from(decoded)),
        Err(_) => Some(raw),
    }
}

/// cookieヘッダ文字列から `name=` に一致する最初の値を返す（未デコード）
fn find_cookie<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(name)?.strip_prefix('='))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_cookie_single() {
        assert_eq!(find_cookie("csrftoken=abc123", "csrftoken"), Some("abc123"));
    }

    #[test]
    fn test_find_cookie_among_several() {
        let cookies = "sessionid=xyz; csrftoken=abc123; theme=dark";
        assert_eq!(find_cookie(cookies, "csrftoken"), Some("abc123"));
    }

    #[test]
    fn test_find_cookie_ignores_prefix_named() {
        // xcsrftoken は csrftoken とは別物
        let cookies = "xcsrftoken=wrong; csrftoken=right";
        assert_eq!(find_cookie(cookies, "csrftoken"), Some("right"));
    }

    #[test]
    fn test_find_cookie_missing() {
        assert_eq!(find_cookie("sessionid=xyz", "csrftoken"), None);
        assert_eq!(find_cookie("", "csrftoken"), None);
    }

    #[test]
    fn test_find_cookie_keeps_raw_value() {
        // デコード前の値をそのまま返す
        assert_eq!(
            find_cookie("csrftoken=a%3Db", "csrftoken"),
            Some("a%3Db")
        );
    }

    #[test]
    fn test_find_cookie_empty_value() {
        assert_eq!(find_cookie("csrftoken=", "csrftoken"), Some(""));
    }
}
