/// This module provides a synthetic slope stability dataset for landslide susceptibility
pub mod landslide;
