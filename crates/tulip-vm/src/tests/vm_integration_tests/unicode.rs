use super::helpers::output_of;

#[test]
fn test_unicode_identifiers_and_strings() {
    let source = r#"
        let 名前 = "太郎"
        let 挨拶 = "こんにちは、" + 名前 + "さん"
        print(挨拶)
    "#;
    assert_eq!(output_of(source), "こんにちは、太郎さん");
}

#[test]
fn test_emoji_struct() {
    let source = r#"
        struct 🐱 { name; lives = 9 }
        let cat = 🐱{name = "Whiskers"}
        print(cat.name, cat.lives)
    "#;
    assert_eq!(output_of(source), "Whiskers 9");
}

#[test]
fn test_string_indexing_is_by_character() {
    let source = r#"
        let s = "añb🌷"
        print(len(s), s[1], s[3], s[1:3])
    "#;
    assert_eq!(output_of(source), "4 ñ 🌷 ñb");
}

#[test]
fn test_unicode_string_functions() {
    let source = r#"
        print(str_upper("straße"), str_index_of("日本語テキスト", "テ"), substring("日本語", 1, 3))
    "#;
    assert_eq!(output_of(source), "STRASSE 3 本語");
}

#[test]
fn test_iterating_a_unicode_string() {
    let source = r#"
        iter (let c in "é🌷z") { print(c + "-") }
    "#;
    assert_eq!(output_of(source), "é-🌷-z-");
}
