fn main() -> anyhow::Result<()> {
    validagen::cli::run_cli()
}
