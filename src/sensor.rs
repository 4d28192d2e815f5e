//! Sound sensor filtering
//!
//! Turns noisy raw ADC samples into volts, smooths them with a moving
//! average over a fixed window and thresholds the result into a binary
//! "sound detected" decision.

use heapless::HistoryBuffer;

use crate::AnalogInput;

/// Default number of samples in the moving average window
pub const SAMPLE_COUNT: usize = 1200;

/// Largest raw value of the 12-bit ADC
pub const ADC_MAX: u16 = 4095;

/// Filtered voltage above which the digital value is set
pub const DIGITAL_THRESHOLD: f32 = 0.5;

/// Moving average filter over an analog sound sensor
///
/// The window always holds exactly `N` samples. It starts zero-filled, so the
/// average is taken over the whole window even before `N` samples were read.
/// RAM cost: `N * 4` bytes.
pub struct SignalFilter<A: AnalogInput, const N: usize = SAMPLE_COUNT> {
    input: A,
    reference_voltage: f32,
    samples: HistoryBuffer<f32, N>,
}

impl<A: AnalogInput> SignalFilter<A> {
    /// Create a filter with the default window of [`SAMPLE_COUNT`] samples
    ///
    /// # Arguments
    /// * `input` - ADC pin the sensor is wired to
    /// * `reference_voltage` - ADC reference voltage, usually 3.3 or 5.0
    pub fn new(input: A, reference_voltage: f32) -> Self {
        Self::with_window(input, reference_voltage)
    }
}

impl<A: AnalogInput, const N: usize> SignalFilter<A, N> {
    /// Create a filter with a window of `N` samples
    pub fn with_window(input: A, reference_voltage: f32) -> Self {
        const { assert!(N > 0, "sample window must not be empty") };

        Self {
            input,
            reference_voltage,
            samples: HistoryBuffer::new_with(0.0),
        }
    }

    /// Read one sample and convert it to volts
    ///
    /// Does not touch the averaging window.
    pub fn read_voltage(&mut self) -> f32 {
        let raw = self.input.read_raw();
        f32::from(raw) * self.reference_voltage / f32::from(ADC_MAX)
    }

    /// Read one sample into the window and return the window average
    ///
    /// Every call performs a hardware read and overwrites the oldest sample.
    pub fn filtered_voltage(&mut self) -> f32 {
        let voltage = self.read_voltage();
        self.samples.write(voltage);
        self.average()
    }

    /// Read one sample and report whether the filtered voltage is above
    /// [`DIGITAL_THRESHOLD`]
    pub fn digital_value(&mut self) -> bool {
        self.filtered_voltage() > DIGITAL_THRESHOLD
    }

    /// Clear the window back to zeros
    pub fn reset(&mut self) {
        self.samples = HistoryBuffer::new_with(0.0);
    }

    /// Reference voltage the filter was calibrated with
    pub const fn reference_voltage(&self) -> f32 {
        self.reference_voltage
    }

    /// Number of samples the average is taken over
    pub const fn window_len(&self) -> usize {
        N
    }

    /// Give the analog input back
    pub fn release(self) -> A {
        self.input
    }

    #[allow(clippy::cast_precision_loss)]
    fn average(&self) -> f32 {
        let sum: f32 = self.samples.as_slice().iter().sum();
        sum / N as f32
    }
}
