//! Bundled sample diagram

/// Sample diagram covering interfaces, inheritance, aggregation, composition,
/// association and overloaded constructors
pub const EXAMPLE_DIAGRAM: &str = "// sample class diagram
// text after // is ignored

Nomeavel <Interface>
---
---
+ getNome(): str
---

Identificavel <Interface>
---
---
+ getId(): int
---

Aluno
extends Pessoa
implements Nomeavel <Interface>, Identificavel <Interface>
---
- turmas: List<Turma>
- nome: str
- nasc: int
---
+ Aluno(nome: str)
+ Aluno(nome: str, nasc: int)
+ setNome(nome: str): void
+ getNome(): str
+ getId(): int
---

Pessoa
---
- cpf: str
---
---

Turma
aggregates Aluno
---
- cod: int
---
---

Universidade
composes Departamento
---
---
---

Departamento
association Turma
---
- cod: int
---
---
";

/// The bundled sample diagram text
pub fn example_diagram() -> &'static str {
    EXAMPLE_DIAGRAM
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RelationKind;
    use crate::plugins::class::ClassDiagramParser;

    #[test]
    fn test_example_parses() {
        let classes = ClassDiagramParser::new()
            .parse_classes(example_diagram())
            .unwrap();

        let names: Vec<_> = classes.iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec![
                "Nomeavel",
                "Identificavel",
                "Aluno",
                "Pessoa",
                "Turma",
                "Universidade",
                "Departamento"
            ]
        );

        let aluno = &classes[2];
        assert_eq!(aluno.context.constructors().count(), 2);
        assert_eq!(aluno.context.operations().count(), 3);
        assert_eq!(aluno.relations[0].relationship, RelationKind::Generalization);
    }
}
