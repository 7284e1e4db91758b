use envseed::AppContext;

fn main() {
    // Show the loader's debug/info output unless RUST_LOG says otherwise.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .init();

    let ctx = AppContext::builder().with_env_file("demos/demo.env").build();

    ctx.set("APP_NAME", "envseed-demo");

    println!("APP_NAME = {:?}", ctx.get("APP_NAME"));
    println!("DB_HOST  = {:?}", ctx.get("DB_HOST"));
    println!("DB_PORT  = {:?}", ctx.get("DB_PORT"));
    // PATH comes from the OS environment snapshot, never from the file.
    println!("PATH set = {}", ctx.get("PATH").is_some());
}
