mod fallback;
mod round_trip;
