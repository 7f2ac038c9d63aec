mod fetch;
mod sandbox;
