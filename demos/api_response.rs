use iam_codes::{
    definitions, install, register_codes, CodedError, ErrResponse, RegistryBuilder, Result,
};

fn find_policy(name: &str) -> Result<()> {
    // Simulate a service-specific failure
    Err(CodedError::new(120_001, format!("policy '{}' missing from store", name))
        .with_metadata("tenant", "acme"))
}

fn decode_body(raw: &str) -> Result<()> {
    if raw.trim_start().starts_with('{') {
        return Ok(());
    }
    Err(CodedError::from_code(
        &definitions::ERR_DECODING_JSON,
        "request body is not a JSON object",
    ))
}

fn respond(err: &CodedError) {
    let (status, body) = ErrResponse::from_error(err);

    println!("1. [CLIENT RESPONSE] HTTP {}", status);
    match serde_json::to_string(&body) {
        Ok(json) => println!("   {}", json),
        Err(e) => eprintln!("   body serialization failed: {}", e),
    }

    println!("2. [INTERNAL LOG]");
    err.with_internal_log(|log| {
        let mut line = String::new();
        if log.write_to(&mut line).is_ok() {
            println!("   {}", line);
        }
    });
    println!();
}

fn main() {
    // Extend the shared catalog before anything reads the global registry.
    let mut builder = RegistryBuilder::with_builtin();
    register_codes!(&mut builder => {
        120_001 => (404, "Policy not found"),
    });
    if install(builder.build()).is_err() {
        eprintln!("registry already initialized; service codes unavailable");
    }

    println!("--- API Response Example ---\n");

    if let Err(err) = find_policy("admin-only") {
        respond(&err);
    }
    if let Err(err) = decode_body("name=alice") {
        respond(&err);
    }

    // A code nobody registered still answers with a well-formed 500
    respond(&CodedError::new(999_999, "raised by an outdated plugin"));
}
