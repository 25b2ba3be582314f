use oauthsign_core::{Context, OsEnv, ProvideCredentialChain, Result, Signer};
use oauthsign_oauth1::{
    Config, DefaultCredentialProvider, EnvCredentialProvider, RequestSigner,
    StaticCredentialProvider,
};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::builder().try_init();

    let ctx = Context::new().with_env(OsEnv);
    let config = Config::new().from_env(&ctx);

    // OAUTH1_* env vars win, the static demo credential is the fallback.
    let loader = DefaultCredentialProvider::with_chain(
        ProvideCredentialChain::new()
            .push(EnvCredentialProvider::new())
            .push(StaticCredentialProvider::new(
                "demo-consumer-key",
                "demo-consumer-secret",
            )),
    );
    let signer = Signer::new(ctx, loader, RequestSigner::from_config(&config));

    let (mut parts, _) = http::Request::get("https://api.example.com/1/statuses?count=10")
        .body(())
        .expect("request must be valid")
        .into_parts();
    signer.sign(&mut parts, b"").await?;

    for (name, value) in parts.headers.iter() {
        println!("{name}: {value:?}");
    }

    Ok(())
}
