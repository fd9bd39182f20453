// Elora split keyboard firmware with Myriad expansion card support (ESP32-C3)

#![no_std]

pub mod board;
pub mod drivers;
pub mod kernel;
