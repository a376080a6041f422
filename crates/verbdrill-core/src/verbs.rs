//! Built-in verb table.

use crate::model::{VerbKind, VerbList, VerbRecord};

use VerbKind::{Irregular, Regular};

/// (infinitive, past simple, past participle, translation, type)
const BUILTIN_VERBS: &[(&str, &str, &str, &str, VerbKind)] = &[
    ("be", "was/were", "been", "ser/estar", Irregular),
    ("go", "went", "gone", "ir", Irregular),
    ("play", "played", "played", "jugar", Regular),
    ("study", "studied", "studied", "estudiar", Regular),
    ("eat", "ate", "eaten", "comer", Irregular),
    ("drink", "drank", "drunk", "beber", Irregular),
    ("work", "worked", "worked", "trabajar", Regular),
    ("write", "wrote", "written", "escribir", Irregular),
    ("read", "read", "read", "leer", Irregular),
    ("see", "saw", "seen", "ver", Irregular),
    ("have", "had", "had", "tener/haber", Irregular),
    ("make", "made", "made", "hacer/fabricar", Irregular),
    ("do", "did", "done", "hacer", Irregular),
    ("say", "said", "said", "decir", Irregular),
    ("get", "got", "got/gotten", "conseguir/obtener", Irregular),
    ("know", "knew", "known", "saber/conocer", Irregular),
    ("think", "thought", "thought", "pensar", Irregular),
    ("take", "took", "taken", "tomar/coger", Irregular),
    ("come", "came", "come", "venir", Irregular),
    ("want", "wanted", "wanted", "querer", Regular),
    ("look", "looked", "looked", "mirar", Regular),
    ("use", "used", "used", "usar", Regular),
    ("find", "found", "found", "encontrar", Irregular),
    ("give", "gave", "given", "dar", Irregular),
    ("tell", "told", "told", "decir/contar", Irregular),
    ("burn", "burned, burnt", "burned, burnt", "quemar", Irregular),
    ("learn", "learned, learnt", "learned, learnt", "aprender", Irregular),
];

/// The verb list compiled into the binary.
pub fn builtin_verb_list() -> VerbList {
    VerbList {
        id: "builtin".into(),
        name: "Common English verbs".into(),
        description: "Frequent regular and irregular verbs with Spanish translations".into(),
        verbs: BUILTIN_VERBS
            .iter()
            .map(|&(inf, past, participle, translation, kind)| {
                VerbRecord::new(inf, past, participle, translation, kind)
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_list_is_populated() {
        let list = builtin_verb_list();
        assert_eq!(list.verbs.len(), BUILTIN_VERBS.len());
        assert_eq!(list.verbs[0].infinitive, "be");
        assert!(list
            .verbs
            .iter()
            .any(|v| v.kind == VerbKind::Regular));
    }

    #[test]
    fn builtin_cells_are_never_blank() {
        for verb in builtin_verb_list().verbs {
            assert!(!verb.infinitive.trim().is_empty());
            assert!(!verb.past_simple.trim().is_empty());
            assert!(!verb.past_participle.trim().is_empty());
            assert!(!verb.translation.trim().is_empty());
        }
    }
}
