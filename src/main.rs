#[actix_web::main]
async fn main() -> std::io::Result<()> {
    invoice_docgen_server::run().await
}
