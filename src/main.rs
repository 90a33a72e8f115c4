use anyhow::Result;

fn main() -> Result<()> {
    debate_chat::cli::run()
}
