use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    accounts::cli::run().await?;
    Ok(())
}
