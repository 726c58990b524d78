use playerdat_nbt::{Compound, Tag, TagList};
use serde_json::Value as JsonValue;

use crate::error::ParseError;
use crate::lexer::Lexer;

/// The parsed form of a `/give`-style item specification.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSpec {
    pub item_id: String,
    pub count: i32,
    pub components: Option<Compound>,
}

/// Parses a give-command string such as
/// `"diamond_sword[custom_name='\"Sword\"',enchantments={sharpness:5}] 2"` into an [`ItemSpec`].
pub fn parse_give_command(input: &str) -> Result<ItemSpec, ParseError> {
    let mut lexer = Lexer::new(input);
    lexer.skip_whitespace();

    let after_give = lexer.remaining().strip_prefix("give");
    if after_give.is_some_and(|rest| rest.chars().next().is_none_or(char::is_whitespace)) {
        for _ in 0..4 {
            lexer.bump();
        }
        lexer.skip_whitespace();
    }

    if matches!(lexer.peek(), Some('@')) {
        lexer.take_while(|ch| !ch.is_whitespace());
        lexer.skip_whitespace();
    }

    let item_id = parse_qualified_id(&mut lexer)?;
    lexer.skip_whitespace();

    let components = if matches!(lexer.peek(), Some('[')) {
        lexer.bump();
        let compound = parse_component_list(&mut lexer)?;
        lexer.skip_whitespace();
        lexer.eat(']')?;
        Some(compound)
    } else {
        None
    };

    lexer.skip_whitespace();
    let count = if lexer.at_end() {
        1
    } else {
        let token = lexer.take_while(|ch| ch.is_ascii_digit() || ch == '-');
        if token.is_empty() {
            return Err(ParseError::new(lexer.pos(), "count or end of input"));
        }
        token
            .parse::<i32>()
            .map_err(|_| ParseError::new(lexer.pos(), "a valid integer count"))?
    };

    lexer.skip_whitespace();
    if !lexer.at_end() {
        return Err(ParseError::new(lexer.pos(), "end of input"));
    }

    Ok(ItemSpec { item_id, count, components })
}

fn parse_component_list(lexer: &mut Lexer<'_>) -> Result<Compound, ParseError> {
    let mut compound = Compound::new();
    lexer.skip_whitespace();
    if matches!(lexer.peek(), Some(']')) {
        return Ok(compound);
    }
    loop {
        let (key, value) = parse_component(lexer)?;
        compound.insert(key, value);
        lexer.skip_whitespace();
        if matches!(lexer.peek(), Some(',')) {
            lexer.bump();
            lexer.skip_whitespace();
            continue;
        }
        break;
    }
    Ok(compound)
}

fn parse_component(lexer: &mut Lexer<'_>) -> Result<(String, Tag), ParseError> {
    let key = parse_qualified_id(lexer)?;
    lexer.skip_whitespace();
    lexer.eat('=')?;
    lexer.skip_whitespace();
    let value = parse_value(lexer)?;
    Ok((key, value))
}

fn parse_value(lexer: &mut Lexer<'_>) -> Result<Tag, ParseError> {
    lexer.skip_whitespace();
    match lexer.peek() {
        Some('"' | '\'') => {
            let content = lexer.quoted_string()?;
            Ok(match serde_json::from_str::<JsonValue>(&content) {
                Ok(json) => json_to_tag(&json),
                Err(_) => Tag::String(content),
            })
        }
        Some('{') => parse_compound_value(lexer),
        Some('[') => parse_list_value(lexer),
        _ => parse_bare_value(lexer),
    }
}

fn parse_compound_value(lexer: &mut Lexer<'_>) -> Result<Tag, ParseError> {
    lexer.eat('{')?;
    let mut compound = Compound::new();
    lexer.skip_whitespace();
    if matches!(lexer.peek(), Some('}')) {
        lexer.bump();
        return Ok(Tag::Compound(compound));
    }
    loop {
        let key = parse_entry_key(lexer)?;
        lexer.skip_whitespace();
        lexer.eat(':')?;
        lexer.skip_whitespace();
        let value = parse_value(lexer)?;
        compound.insert(key, value);
        lexer.skip_whitespace();
        if matches!(lexer.peek(), Some(',')) {
            lexer.bump();
            lexer.skip_whitespace();
            continue;
        }
        break;
    }
    lexer.skip_whitespace();
    lexer.eat('}')?;
    Ok(Tag::Compound(compound))
}

fn parse_list_value(lexer: &mut Lexer<'_>) -> Result<Tag, ParseError> {
    lexer.eat('[')?;
    let mut list = TagList::new();
    lexer.skip_whitespace();
    if matches!(lexer.peek(), Some(']')) {
        lexer.bump();
        return Ok(Tag::List(list));
    }
    loop {
        let value = parse_value(lexer)?;
        let pos = lexer.pos();
        list.push(value)
            .map_err(|_| ParseError::new(pos, "a list element matching the declared kind"))?;
        lexer.skip_whitespace();
        if matches!(lexer.peek(), Some(',')) {
            lexer.bump();
            lexer.skip_whitespace();
            continue;
        }
        break;
    }
    lexer.skip_whitespace();
    lexer.eat(']')?;
    Ok(Tag::List(list))
}

fn parse_entry_key(lexer: &mut Lexer<'_>) -> Result<String, ParseError> {
    match lexer.peek() {
        Some('"' | '\'') => lexer.quoted_string(),
        _ => {
            let token = lexer.take_while(|ch| ch != ':' && !ch.is_whitespace());
            if token.is_empty() {
                Err(ParseError::new(lexer.pos(), "an entry key"))
            } else {
                Ok(token.to_owned())
            }
        }
    }
}

fn parse_bare_value(lexer: &mut Lexer<'_>) -> Result<Tag, ParseError> {
    let pos = lexer.pos();
    let token = lexer.take_while(|ch| !matches!(ch, ',' | ']' | '}' | '[' | '{' | '"' | '\'') && !ch.is_whitespace());
    if token.is_empty() {
        return Err(ParseError::new(pos, "a value"));
    }
    Ok(match token {
        "true" => Tag::Byte(1),
        "false" => Tag::Byte(0),
        _ => {
            if let Ok(value) = token.parse::<i32>() {
                Tag::Int(value)
            } else if looks_like_float(token) && token.parse::<f64>().is_ok() {
                Tag::Double(token.parse().expect("validated by looks_like_float"))
            } else {
                Tag::String(token.to_owned())
            }
        }
    })
}

fn looks_like_float(token: &str) -> bool {
    token.contains('.') || token.contains('e') || token.contains('E')
}

fn parse_qualified_id(lexer: &mut Lexer<'_>) -> Result<String, ParseError> {
    let pos = lexer.pos();
    let token = lexer.take_while(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '-' | '/' | ':'));
    if token.is_empty() {
        return Err(ParseError::new(pos, "an identifier"));
    }
    Ok(match token.split_once(':') {
        Some((namespace, bare)) => format!("{namespace}:{bare}"),
        None => format!("minecraft:{token}"),
    })
}

fn json_to_tag(value: &JsonValue) -> Tag {
    match value {
        JsonValue::Null => Tag::String(String::new()),
        JsonValue::Bool(flag) => Tag::Byte(i8::from(*flag)),
        JsonValue::Number(number) => match number.as_i64().and_then(|v| i32::try_from(v).ok()) {
            Some(value) => Tag::Int(value),
            None => Tag::Double(number.as_f64().unwrap_or_default()),
        },
        JsonValue::String(value) => Tag::String(value.clone()),
        JsonValue::Array(items) => {
            let mut list = TagList::new();
            for item in items {
                // A heterogeneous JSON array has no faithful NBT List representation; elements
                // that don't match the first element's kind are dropped rather than failing the
                // whole parse, since this path is already a best-effort fallback for a quoted
                // string that happened to look like JSON.
                let _ = list.push(json_to_tag(item));
            }
            Tag::List(list)
        }
        JsonValue::Object(entries) => {
            let mut compound = Compound::new();
            for (key, value) in entries {
                compound.insert(key.clone(), json_to_tag(value));
            }
            Tag::Compound(compound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s3_give_command_parse() {
        let spec = parse_give_command(
            "diamond_sword[custom_name='\"Sword\"',enchantments={sharpness:5}] 2",
        )
        .unwrap();

        assert_eq!(spec.item_id, "minecraft:diamond_sword");
        assert_eq!(spec.count, 2);

        let components = spec.components.unwrap();
        assert_eq!(
            components.get_tag("minecraft:custom_name"),
            Some(&Tag::String("Sword".to_owned()))
        );
        let enchantments = components.get_tag("minecraft:enchantments").unwrap();
        match enchantments {
            Tag::Compound(inner) => {
                assert_eq!(inner.get_tag("sharpness"), Some(&Tag::Int(5)));
            }
            other => panic!("expected Compound, got {other:?}"),
        }
    }

    #[test]
    fn defaults_count_to_one() {
        let spec = parse_give_command("stick").unwrap();
        assert_eq!(spec.item_id, "minecraft:stick");
        assert_eq!(spec.count, 1);
        assert!(spec.components.is_none());
    }

    #[test]
    fn strips_give_keyword_and_selector() {
        let spec = parse_give_command("give @p stick 3").unwrap();
        assert_eq!(spec.item_id, "minecraft:stick");
        assert_eq!(spec.count, 3);
    }

    #[test]
    fn booleans_become_byte_tags() {
        let spec = parse_give_command("stick[unbreakable=true]").unwrap();
        let components = spec.components.unwrap();
        assert_eq!(components.get_tag("minecraft:unbreakable"), Some(&Tag::Byte(1)));
    }

    #[test]
    fn comma_inside_quotes_is_not_a_separator() {
        let spec = parse_give_command("stick[custom_name=\"a, b\"]").unwrap();
        let components = spec.components.unwrap();
        assert_eq!(
            components.get_tag("minecraft:custom_name"),
            Some(&Tag::String("a, b".to_owned()))
        );
    }

    #[test]
    fn idempotence_on_components() {
        let spec = parse_give_command("stick[power=5,ratio=1.5,flag=true]").unwrap();
        let components = spec.components.clone().unwrap();

        let rendered = format!(
            "power={},ratio={},flag={}",
            match components.get_tag("minecraft:power").unwrap() {
                Tag::Int(value) => value.to_string(),
                other => panic!("{other:?}"),
            },
            match components.get_tag("minecraft:ratio").unwrap() {
                Tag::Double(value) => value.to_string(),
                other => panic!("{other:?}"),
            },
            match components.get_tag("minecraft:flag").unwrap() {
                Tag::Byte(1) => "true",
                other => panic!("{other:?}"),
            },
        );
        let reparsed = parse_give_command(&format!("stick[{rendered}]")).unwrap();
        assert_eq!(reparsed.components, spec.components);
    }
}
