// Skill extraction engine: ontology, sanitizing, section mapping, candidate scoring,
// validation, ranking and classification. Handlers run the engine on blocking workers.

pub mod candidates;
pub mod classifier;
pub mod engine;
pub mod handlers;
pub mod lexicon;
pub mod ontology;
mod ontology_data;
pub mod preprocess;
pub mod profile;
pub mod ranker;
pub mod sanitizer;
pub mod sections;
pub mod settings;
pub mod tagger;
pub mod tfidf;
pub mod validator;
