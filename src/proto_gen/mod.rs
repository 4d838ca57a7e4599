// Generated by build/rust_build.rs from resources/phonemetadata.proto and
// resources/phonenumber.proto.
include!(concat!(env!("OUT_DIR"), "/proto_gen/mod.rs"));
