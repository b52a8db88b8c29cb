mod envelope_roundtrip;
mod session_roundtrip;
mod wire_roundtrip;
