//! # Léxicos Embutidos e Textos de Demonstração
//!
//! Listas pequenas de nomes e palavras funcionais em inglês usadas pelo
//! analisador léxico embutido (tier `fast`). Não substituem um modelo
//! estatístico de verdade: servem para que o sistema funcione sem nenhum
//! recurso externo instalado.

/// Primeiros nomes comuns (lowercase)
pub const PERSON_NAMES: &[&str] = &[
    "alice", "ammar", "anna", "bob", "carol", "charles", "david", "elizabeth",
    "emma", "george", "jack", "jamal", "james", "jane", "jay", "john", "joseph",
    "laura", "maria", "mary", "michael", "mohammed", "olivia", "peter", "raju",
    "robert", "sakib", "sarah", "smith", "thomas", "umar", "william", "yog",
];

/// Lugares conhecidos (lowercase, podem ter várias palavras)
pub const PLACE_NAMES: &[&str] = &[
    "africa", "amsterdam", "asia", "bangladesh", "berlin", "boston", "california",
    "canada", "chicago", "dhaka", "england", "europe", "france", "germany",
    "india", "italy", "japan", "karachi", "london", "los angeles", "madrid",
    "new york", "pakistan", "paris", "rome", "san francisco", "spain", "texas",
    "tokyo", "united kingdom", "united states", "washington",
];

/// Organizações conhecidas (lowercase)
pub const ORGANIZATION_NAMES: &[&str] = &[
    "google", "microsoft", "nasa", "united nations", "unesco",
];

/// Palavras funcionais com classe gramatical fixa.
///
/// Consultadas antes da capitalização: "The" no início da frase continua
/// sendo determinante.
pub const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "some",
    "any", "no", "all", "both",
];
pub const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us",
    "them", "my", "your", "his", "its", "our", "their", "who", "whom", "what",
    "which", "someone", "everyone",
];
pub const ADPOSITIONS: &[&str] = &[
    "at", "in", "on", "of", "to", "from", "with", "by", "for", "near", "into",
    "onto", "over", "under", "about", "after", "before", "between", "through",
    "during", "without", "across", "around",
];
pub const AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "do", "does", "did", "will", "would", "shall", "should", "can",
    "could", "may", "might", "must",
];
pub const COORDINATORS: &[&str] = &["and", "or", "but", "nor", "yet", "so"];
pub const SUBORDINATORS: &[&str] = &[
    "if", "because", "although", "while", "when", "whereas", "since", "unless",
];
pub const PARTICLES: &[&str] = &["not", "n't", "'s", "\u{2019}s"];
pub const ADVERBS: &[&str] = &[
    "yesterday", "today", "tomorrow", "then", "now", "here", "there", "also",
    "very", "again", "already", "soon", "later", "never", "always",
];

/// Verbos frequentes que não têm sufixo verbal ("Tell", "met", "miss")
pub const VERBS: &[&str] = &[
    "tell", "told", "ask", "say", "said", "see", "saw", "go", "went", "come", "came",
    "let", "take", "took", "give", "gave", "make", "made", "meet", "met", "call",
    "find", "found", "look", "send", "sent", "bring", "brought", "keep", "kept",
    "put", "miss", "visit", "show", "thank", "write", "wrote", "read", "run", "ran",
    "get", "got", "try", "help", "stop", "wait", "leave", "left", "drove", "flew",
    "know", "knew", "think", "thought", "want", "like", "love", "work", "live",
];

/// Preposições que costumam introduzir um lugar ("in Boston", "from Dhaka")
pub const PLACE_PREPOSITIONS: &[&str] = &["in", "from", "to", "near", "across"];

/// Textos de demonstração para as interfaces
pub fn demo_texts() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "Parque",
            "Jamal met Umar at the park yesterday.",
        ),
        (
            "Faculdade",
            "Jamal met Sakib at the college yesterday.",
        ),
        (
            "Projeto",
            "Ammar and Jamal are working on an IoT project.",
        ),
        (
            "Minúsculas",
            "Yog met jay at the park yesterday. raju met Sakib at the park yesterday.",
        ),
        (
            "Títulos",
            "Dr. Smith met Alice at the park yesterday. Later mr.smith called Jane Smith from London.",
        ),
        (
            "Viagem",
            "Mrs. Jones flew from New York to Paris, where she was joined by Prof. Tanaka and a man called Rahim.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicons_are_lowercase() {
        for list in [PERSON_NAMES, PLACE_NAMES, ORGANIZATION_NAMES, DETERMINERS, ADPOSITIONS] {
            for word in list {
                assert_eq!(*word, word.to_lowercase());
            }
        }
    }

    #[test]
    fn test_demo_texts_not_empty() {
        let texts = demo_texts();
        assert!(!texts.is_empty());
        assert!(texts.iter().all(|(_, text)| !text.trim().is_empty()));
    }
}
