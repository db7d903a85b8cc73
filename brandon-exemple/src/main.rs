use brandon_core::config::{CaseFolding, ModelConfig};
use brandon_core::model::generator::Generator;
use brandon_core::model::sampler::UniformSource;
use brandon_core::model::search_input::SearchInput;
use log::{info, warn};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Lowercase the corpora so that "Nokia" and "nokia" are the same word
    let config = ModelConfig { case_folding: CaseFolding::Lowercase, ..ModelConfig::default() };

    // Train one model per corpus found in the "data" directory (.dat files)
    let generator = Generator::new("./data", config)?;
    info!("models loaded: {}", generator.get_model_names().join(", "));

    let mut input = SearchInput::default();

    // Keep the 10 best candidates of each search
    input.set_top_k(10)?;

    // Every round samples top_k * batch_factor random words,
    // the best candidates are kept across rounds
    input.set_rounds(200)?;

    // Length of the generated names
    input.set_word_length(6)?;

    // Do not propose names already in the corpus, nor the same name twice
    input.exclude_known = true;
    input.distinct = true;

    // Invalid values are rejected and the previous value is kept
    match input.set_top_k(0) {
        Ok(_) => println!("Should not happen"),
        Err(e) => warn!("top_k 0 is invalid: {e}"),
    }
    match input.set_word_length(0) {
        Ok(_) => println!("Should not happen"),
        Err(e) => warn!("word_length 0 is invalid: {e}"),
    }

    // Same seed, same names
    for name in generator.get_model_names() {
        let mut source = UniformSource::seeded(2012);
        info!("searching {} rounds of {} candidates with model {name}", input.rounds, input.batch_size());
        println!("--- {name} ---");
        for (i, candidate) in generator.generate(&name, &input, &mut source)?.iter().enumerate() {
            println!("{:>2}. {} ({:.3})", i + 1, candidate.payload(), candidate.score());
        }
    }

    Ok(())
}
