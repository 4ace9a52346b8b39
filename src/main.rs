#[tokio::main]
async fn main() {
    modinstaller_lib::run().await
}
