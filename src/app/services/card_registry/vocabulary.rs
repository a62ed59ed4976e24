//! Static GSSHA project card vocabulary
//!
//! Every card a project file may carry, with the type of value it takes.
//! Table order is the order `all_cards()` reports.

use crate::app::models::{Card, ValueType};

use ValueType::{Boolean, Date, Float, Integer, Path, String, Time};

/// The registered project cards
pub static CARDS: &[Card] = &[
    // Required inputs
    Card::new("WATERSHED_MASK", Path),
    Card::new("ELEVATION", Path),
    Card::new("PROJECTION_FILE", Path),
    Card::new("MAPPING_TABLE", Path),
    Card::new("PROJECT_PATH", String),
    Card::new("GRIDSIZE", Float),
    Card::new("ROWS", Integer),
    Card::new("COLS", Integer),
    Card::new("MAP_TYPE", Integer),
    Card::new("TOT_TIME", Integer),
    Card::new("TIMESTEP", Float),
    Card::new("HYD_FREQ", Integer),
    Card::new("MAP_FREQ", Integer),
    Card::new("OUTROW", Integer),
    Card::new("OUTCOL", Integer),
    Card::new("OUTSLOPE", Float),
    Card::new("METRIC", Boolean),
    Card::new("QUIET", Boolean),
    Card::new("SUPER_QUIET", Boolean),
    Card::new("CHECK_MASS", Boolean),
    // Output files
    Card::new("SUMMARY", Path),
    Card::new("OUTLET_HYDRO", Path),
    Card::new("OUTLET_SED_FLUX", Path),
    Card::new("OUTLET_SED_TSS", Path),
    Card::new("OUT_HYD_LOCATION", Path),
    Card::new("OUT_THETA_LOCATION", Path),
    Card::new("OUT_GWFLUX_LOCATION", Path),
    Card::new("OUT_WELL_LOCATION", Path),
    Card::new("DEPTH", Path),
    Card::new("INF_DEPTH", Path),
    Card::new("GW_OUTPUT", Path),
    Card::new("DISCHARGE", Path),
    Card::new("WRITE_OV_HOTSTART", Path),
    Card::new("WRITE_CHAN_HOTSTART", Path),
    Card::new("WRITE_SM_HOTSTART", Path),
    // Overland flow
    Card::new("MANNING_N", Float),
    Card::new("OV_ROUGH_FILE", Path),
    Card::new("DIFFUSIVE_WAVE", Boolean),
    Card::new("EXPLICIT", Boolean),
    Card::new("IMPLICIT", Boolean),
    // Rainfall
    Card::new("PRECIP_UNIF", Boolean),
    Card::new("RAIN_INTENSITY", Float),
    Card::new("RAIN_DURATION", Float),
    Card::new("START_DATE", Date),
    Card::new("START_TIME", Time),
    Card::new("END_DATE", Date),
    Card::new("END_TIME", Time),
    Card::new("PRECIP_FILE", Path),
    Card::new("RAIN_INV_DISTANCE", Boolean),
    Card::new("RAIN_THIESSEN", Boolean),
    Card::new("RAIN_CONV", Float),
    // Infiltration
    Card::new("INF_REDIST", Boolean),
    Card::new("GREEN_AMPT", Boolean),
    Card::new("RICHARDS", Boolean),
    Card::new("HYDRAULIC_COND", Float),
    Card::new("MOISTURE_INITIAL", Float),
    // Channel routing
    Card::new("CHANNEL_INPUT", Path),
    Card::new("STREAM_CELL", Path),
    Card::new("MANNING_N_CHANNEL", Float),
    // Long-term simulation
    Card::new("LONG_TERM", Boolean),
    Card::new("HMET_WES", Path),
    Card::new("HMET_ASCII", Path),
    Card::new("HMET_SAMSON", Path),
    Card::new("SEASONAL_RS", Boolean),
    Card::new("LATITUDE", Float),
    Card::new("LONGITUDE", Float),
    Card::new("GMT", Integer),
    // Hotstart and replacement
    Card::new("READ_OV_HOTSTART", Path),
    Card::new("READ_CHAN_HOTSTART", Path),
    Card::new("READ_SM_HOTSTART", Path),
    Card::new("REPLACE_PARAMS", Path),
    Card::new("REPLACE_VALS", Path),
    // Input locations
    Card::new("IN_HYD_LOCATION", Path),
    Card::new("IN_THETA_LOCATION", Path),
    Card::new("IN_GWFLUX_LOCATION", Path),
    Card::new("IN_WELL_LOCATION", Path),
];
