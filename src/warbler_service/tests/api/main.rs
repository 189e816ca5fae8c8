mod helpers;
mod profile;
mod register;
mod register_stream;
