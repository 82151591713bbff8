//! End-to-end flows driving agora-client against the in-memory mock server.

#[cfg(test)]
mod flows;
