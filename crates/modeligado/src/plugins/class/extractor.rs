//! Line extractor
//!
//! Stateless functions turning one isolated logical line into a typed
//! fragment: a relation declaration, a property or a method/constructor.
//! Errors are returned as bare [`ParseErrorKind`]s; the parser driver knows
//! the line number and attaches it.

use super::database::{Method, Parameter, Property};
use crate::core::{Direction, ParseErrorKind, RelationKind, Scope, Visibility};

/// Marker starting a comment that runs to the end of the line
pub const COMMENT_MARKER: &str = "//";

/// Relation vocabulary: keyword, kind, and which side the declaring class is on
const RELATION_KEYWORDS: &[(&str, RelationKind, Direction)] = &[
    ("extends", RelationKind::Generalization, Direction::Forward),
    ("implements", RelationKind::GeneralizationInterface, Direction::Forward),
    ("association", RelationKind::Association, Direction::Forward),
    ("directionalAssociation", RelationKind::DirectionalAssociation, Direction::Forward),
    ("composes", RelationKind::Composition, Direction::Inverse),
    ("aggregates", RelationKind::Aggregation, Direction::Inverse),
];

/// A relation line, before it is attached to its declaring class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationDeclaration {
    pub kind: RelationKind,
    pub types: Vec<String>,
    pub direction: Direction,
}

/// Look up a relation keyword
pub fn relation_keyword(keyword: &str) -> Option<(RelationKind, Direction)> {
    RELATION_KEYWORDS
        .iter()
        .find(|(k, _, _)| *k == keyword)
        .map(|&(_, kind, direction)| (kind, direction))
}

/// Remove a trailing same-line comment and surrounding whitespace
pub fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT_MARKER) {
        Some(pos) => line[..pos].trim(),
        None => line.trim(),
    }
}

/// Parse `keyword Type1, Type2, ...`
pub fn extract_relation(line: &str) -> Result<RelationDeclaration, ParseErrorKind> {
    let line = line.trim();
    let (keyword, rest) = line
        .split_once(char::is_whitespace)
        .unwrap_or((line, ""));

    let (kind, direction) =
        relation_keyword(keyword).ok_or_else(|| ParseErrorKind::UnknownRelationKeyword {
            keyword: keyword.to_string(),
        })?;

    let types: Vec<String> = rest.split(',').map(|t| t.trim().to_string()).collect();
    if types.iter().any(|t| t.is_empty()) {
        return Err(ParseErrorKind::MalformedRelation {
            text: line.to_string(),
        });
    }

    Ok(RelationDeclaration {
        kind,
        types,
        direction,
    })
}

/// Split the leading visibility symbol and optional `static` modifier off a
/// member line, returning the remainder
fn split_modifiers(line: &str) -> Result<(Visibility, Option<Scope>, &str), ParseErrorKind> {
    let line = line.trim();
    let (symbol, rest) = line
        .split_once(char::is_whitespace)
        .unwrap_or((line, ""));

    let visibility =
        Visibility::from_symbol(symbol).ok_or_else(|| ParseErrorKind::UnknownVisibility {
            symbol: symbol.to_string(),
        })?;

    let rest = rest.trim_start();
    match rest.split_once(char::is_whitespace) {
        Some((Scope::KEYWORD, after)) => Ok((visibility, Some(Scope::Class), after.trim())),
        _ => Ok((visibility, None, rest.trim_end())),
    }
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_whitespace)
}

/// Parse `<vis> [static] <name>: <type>`
pub fn extract_attr(line: &str) -> Result<Property, ParseErrorKind> {
    let malformed = || ParseErrorKind::MalformedAttribute {
        text: line.trim().to_string(),
    };

    if line.contains('(') || line.contains(')') {
        return Err(malformed());
    }

    // The name token carries the colon: `cpf: str`, never `cpf:str` or `cpf :str`
    let (visibility, scope, rest) = split_modifiers(line)?;
    let (name_token, type_name) = rest.split_once(char::is_whitespace).ok_or_else(malformed)?;
    let name = name_token.strip_suffix(':').ok_or_else(malformed)?;
    let type_name = type_name.trim();

    if !is_identifier(name) || name.contains(':') || type_name.is_empty() || type_name.contains(':')
    {
        return Err(malformed());
    }
    check_generic_balance(type_name)?;

    Ok(Property {
        name: name.to_string(),
        type_name: type_name.to_string(),
        visibility,
        scope,
    })
}

/// Split `text` on commas that are not nested inside `<...>`
///
/// A `>` without a matching `<`, or a `<` still open at the end, is an error.
pub fn split_top_level(text: &str) -> Result<Vec<&str>, ParseErrorKind> {
    let unbalanced = || ParseErrorKind::UnbalancedGenericBrackets {
        text: text.trim().to_string(),
    };

    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in text.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.checked_sub(1).ok_or_else(unbalanced)?,
            ',' if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(unbalanced());
    }
    parts.push(&text[start..]);
    Ok(parts)
}

/// Verify that a type text has balanced generic brackets
pub fn check_generic_balance(type_text: &str) -> Result<(), ParseErrorKind> {
    split_top_level(type_text).map(|_| ())
}

/// Parse a parameter list such as `a: Map<K, V>, b: int`
pub fn extract_parameters(params: &str) -> Result<Vec<Parameter>, ParseErrorKind> {
    if params.trim().is_empty() {
        return Ok(Vec::new());
    }

    let malformed = || ParseErrorKind::MalformedParameter {
        text: params.trim().to_string(),
    };

    split_top_level(params)?
        .into_iter()
        .map(|param| {
            let mut pieces = param.split(':').map(str::trim);
            match (pieces.next(), pieces.next(), pieces.next()) {
                (Some(name), Some(type_name), None)
                    if is_identifier(name) && !type_name.is_empty() =>
                {
                    Ok(Parameter::new(name, type_name))
                }
                _ => Err(malformed()),
            }
        })
        .collect()
}

/// Parse `<vis> [static] <name>(<params>)[: <returnType>]`
///
/// The line is a constructor exactly when its name equals `owner`.
pub fn extract_method_or_constructor(owner: &str, line: &str) -> Result<Method, ParseErrorKind> {
    let malformed = || ParseErrorKind::MalformedMethodSignature {
        text: line.trim().to_string(),
    };

    let (visibility, scope, signature) = split_modifiers(line)?;

    let open = signature.find('(').ok_or_else(malformed)?;
    let close = signature.find(')').ok_or_else(malformed)?;
    if close < open || signature[close + 1..].contains(['(', ')']) {
        return Err(malformed());
    }
    if signature[open + 1..close].contains('(') {
        return Err(malformed());
    }

    let name = signature[..open].trim();
    if !is_identifier(name) {
        return Err(malformed());
    }

    let parameters = extract_parameters(&signature[open + 1..close])?;

    let tail = signature[close + 1..].trim();
    let return_type = if tail.is_empty() {
        None
    } else {
        let type_text = tail.strip_prefix(':').ok_or_else(malformed)?;
        if type_text.contains(':') {
            return Err(malformed());
        }
        Some(type_text.trim())
    };

    let return_type = if name == owner {
        if scope.is_some() {
            return Err(malformed());
        }
        if return_type.is_some() {
            return Err(ParseErrorKind::UnexpectedReturnType {
                constructor: name.to_string(),
            });
        }
        None
    } else {
        match return_type {
            Some(t) if !t.is_empty() => {
                check_generic_balance(t)?;
                Some(t.to_string())
            }
            _ => {
                return Err(ParseErrorKind::MissingReturnType {
                    method: name.to_string(),
                })
            }
        }
    };

    Ok(Method {
        name: name.to_string(),
        visibility,
        scope,
        parameters,
        return_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("  - cpf: str // document  "), "- cpf: str");
        assert_eq!(strip_comment("// whole line"), "");
        assert_eq!(strip_comment("Pessoa"), "Pessoa");
    }

    #[test]
    fn test_extract_relation_forward() {
        let decl = extract_relation("implements Nomeavel <Interface>, Identificavel").unwrap();
        assert_eq!(decl.kind, RelationKind::GeneralizationInterface);
        assert_eq!(decl.direction, Direction::Forward);
        assert_eq!(decl.types, vec!["Nomeavel <Interface>", "Identificavel"]);
    }

    #[test]
    fn test_extract_relation_inverse() {
        let decl = extract_relation("aggregates Aluno").unwrap();
        assert_eq!(decl.kind, RelationKind::Aggregation);
        assert_eq!(decl.direction, Direction::Inverse);

        let decl = extract_relation("composes Departamento").unwrap();
        assert_eq!(decl.kind, RelationKind::Composition);
        assert_eq!(decl.direction, Direction::Inverse);
    }

    #[test]
    fn test_extract_relation_directional_association() {
        let decl = extract_relation("directionalAssociation Turma").unwrap();
        assert_eq!(decl.kind, RelationKind::DirectionalAssociation);
        assert_eq!(decl.direction, Direction::Forward);
    }

    #[test]
    fn test_extract_relation_unknown_keyword() {
        let err = extract_relation("inherits Pessoa").unwrap_err();
        assert_eq!(
            err,
            ParseErrorKind::UnknownRelationKeyword {
                keyword: "inherits".to_string()
            }
        );
    }

    #[test]
    fn test_extract_relation_without_types() {
        assert!(matches!(
            extract_relation("extends"),
            Err(ParseErrorKind::MalformedRelation { .. })
        ));
        assert!(matches!(
            extract_relation("extends A,"),
            Err(ParseErrorKind::MalformedRelation { .. })
        ));
    }

    #[test]
    fn test_extract_attr() {
        let prop = extract_attr("- cpf: str").unwrap();
        assert_eq!(prop, Property::new("cpf", "str", Visibility::Private));

        let prop = extract_attr("# turmas: List<Turma>").unwrap();
        assert_eq!(prop.visibility, Visibility::Protected);
        assert_eq!(prop.type_name, "List<Turma>");
        assert!(!prop.is_static());
    }

    #[test]
    fn test_extract_static_attr() {
        let prop = extract_attr("+ static contador: int").unwrap();
        assert_eq!(prop.name, "contador");
        assert_eq!(prop.type_name, "int");
        assert_eq!(prop.scope, Some(Scope::Class));
    }

    #[test]
    fn test_attribute_named_static_is_not_a_modifier() {
        let prop = extract_attr("+ static: bool").unwrap();
        assert_eq!(prop.name, "static");
        assert!(prop.scope.is_none());
    }

    #[test]
    fn test_extract_attr_rejects_parentheses() {
        assert_eq!(
            extract_attr("+ getNome()"),
            Err(ParseErrorKind::MalformedAttribute {
                text: "+ getNome()".to_string()
            })
        );
    }

    #[test]
    fn test_extract_attr_malformed_shapes() {
        for line in [
            "- cpf",
            "- : str",
            "- cpf:",
            "-",
            "- nome completo: str",
            "- cpf:str",
            "- cpf :str",
            "- cpf: : str",
            "- cpf: a: b",
        ] {
            assert!(
                matches!(extract_attr(line), Err(ParseErrorKind::MalformedAttribute { .. })),
                "expected malformed attribute for {:?}",
                line
            );
        }
    }

    #[test]
    fn test_extract_attr_unknown_visibility() {
        assert_eq!(
            extract_attr("~ cpf: str"),
            Err(ParseErrorKind::UnknownVisibility {
                symbol: "~".to_string()
            })
        );
    }

    #[test]
    fn test_extract_attr_unbalanced_type() {
        assert!(matches!(
            extract_attr("- turmas: List<Turma"),
            Err(ParseErrorKind::UnbalancedGenericBrackets { .. })
        ));
    }

    #[test]
    fn test_split_top_level_respects_nesting() {
        assert_eq!(
            split_top_level("a: Map<K, V>, b: int").unwrap(),
            vec!["a: Map<K, V>", " b: int"]
        );
        assert_eq!(
            split_top_level("x: List<Map<K,V>>").unwrap(),
            vec!["x: List<Map<K,V>>"]
        );
    }

    #[test]
    fn test_split_top_level_unbalanced() {
        assert!(matches!(
            split_top_level("List<Turma"),
            Err(ParseErrorKind::UnbalancedGenericBrackets { .. })
        ));
        assert!(matches!(
            split_top_level("a: int>, b: List<int"),
            Err(ParseErrorKind::UnbalancedGenericBrackets { .. })
        ));
    }

    #[test]
    fn test_extract_parameters_generic_aware() {
        let params = extract_parameters("a: Map<K, V>, b: int").unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0], Parameter::new("a", "Map<K, V>"));
        assert_eq!(params[1], Parameter::new("b", "int"));
    }

    #[test]
    fn test_extract_parameters_blank() {
        assert!(extract_parameters("").unwrap().is_empty());
        assert!(extract_parameters("   ").unwrap().is_empty());
    }

    #[test]
    fn test_extract_parameters_malformed() {
        for params in ["nome", "nome: str:", ": str", "nome: ", "a: int,"] {
            assert!(
                matches!(
                    extract_parameters(params),
                    Err(ParseErrorKind::MalformedParameter { .. })
                ),
                "expected malformed parameter for {:?}",
                params
            );
        }
    }

    #[test]
    fn test_extract_parameters_unbalanced() {
        assert_eq!(
            extract_parameters("turmas: List<Turma"),
            Err(ParseErrorKind::UnbalancedGenericBrackets {
                text: "turmas: List<Turma".to_string()
            })
        );
    }

    #[test]
    fn test_extract_method() {
        let method = extract_method_or_constructor("Aluno", "+ setNome(nome: str): void").unwrap();
        assert_eq!(method.name, "setNome");
        assert_eq!(method.visibility, Visibility::Public);
        assert_eq!(method.return_type.as_deref(), Some("void"));
        assert_eq!(method.parameters, vec![Parameter::new("nome", "str")]);
        assert!(!method.is_constructor());
    }

    #[test]
    fn test_extract_constructor() {
        let method =
            extract_method_or_constructor("Aluno", "+ Aluno(nome: str, nasc: int)").unwrap();
        assert!(method.is_constructor());
        assert_eq!(method.parameters.len(), 2);
    }

    #[test]
    fn test_uppercase_method_is_not_a_constructor() {
        let method = extract_method_or_constructor("Aluno", "+ Criar(): Aluno").unwrap();
        assert!(!method.is_constructor());
        assert_eq!(method.return_type.as_deref(), Some("Aluno"));
    }

    #[test]
    fn test_extract_static_method() {
        let method =
            extract_method_or_constructor("Util", "- static soma(a: int, b: int): int").unwrap();
        assert_eq!(method.scope, Some(Scope::Class));
        assert_eq!(method.name, "soma");
        assert_eq!(method.visibility, Visibility::Private);
    }

    #[test]
    fn test_method_without_return_type() {
        assert_eq!(
            extract_method_or_constructor("Aluno", "+ getNome()"),
            Err(ParseErrorKind::MissingReturnType {
                method: "getNome".to_string()
            })
        );
        assert_eq!(
            extract_method_or_constructor("Aluno", "+ getNome():"),
            Err(ParseErrorKind::MissingReturnType {
                method: "getNome".to_string()
            })
        );
    }

    #[test]
    fn test_constructor_with_return_type() {
        assert_eq!(
            extract_method_or_constructor("Aluno", "+ Aluno(): void"),
            Err(ParseErrorKind::UnexpectedReturnType {
                constructor: "Aluno".to_string()
            })
        );
    }

    #[test]
    fn test_malformed_signatures() {
        for line in [
            "+ getNome: str",
            "+ (): int",
            "+ getNome)(: int",
            "+ getNome() str",
            "+ get Nome(): str",
            "+ getNome((a: int)): int",
        ] {
            assert!(
                matches!(
                    extract_method_or_constructor("Aluno", line),
                    Err(ParseErrorKind::MalformedMethodSignature { .. })
                ),
                "expected malformed signature for {:?}",
                line
            );
        }
    }

    #[test]
    fn test_return_type_with_extra_colon() {
        assert_eq!(
            extract_method_or_constructor("Aluno", "+ f(): a: b"),
            Err(ParseErrorKind::MalformedMethodSignature {
                text: "+ f(): a: b".to_string()
            })
        );
        assert!(matches!(
            extract_method_or_constructor("Aluno", "+ f():: int"),
            Err(ParseErrorKind::MalformedMethodSignature { .. })
        ));
    }

    #[test]
    fn test_static_constructor_rejected() {
        assert_eq!(
            extract_method_or_constructor("Aluno", "+ static Aluno()"),
            Err(ParseErrorKind::MalformedMethodSignature {
                text: "+ static Aluno()".to_string()
            })
        );
    }

    #[test]
    fn test_generic_return_type() {
        let method =
            extract_method_or_constructor("Turma", "+ getAlunos(): Map<int, List<Aluno>>").unwrap();
        assert_eq!(method.return_type.as_deref(), Some("Map<int, List<Aluno>>"));

        assert!(matches!(
            extract_method_or_constructor("Turma", "+ getAlunos(): List<Aluno"),
            Err(ParseErrorKind::UnbalancedGenericBrackets { .. })
        ));
    }
}
