//! Polling driver for the on-chip successive-approximation ADC
//!
//! One conversion per call: select the channel, start, spin on the done
//! flag for a bounded number of polls, read the result, stop.

use vigil_core::config::SamplerConfig;
use vigil_core::traits::{AdcSample, AnalogSampler, SamplerError};
use vigil_hal::adc::{
    self, AdcRegisters, CHANNEL_COUNT, CR_CLKDIV_MASK, CR_CLKDIV_SHIFT, CR_PDN, CR_SEL_MASK,
    CR_START_MASK, CR_START_NOW, GDR_DONE,
};

/// Polling ADC sampler
pub struct PollingAdc<R> {
    regs: R,
    /// One bit per routed channel
    configured: u8,
    max_polls: u32,
}

impl<R: AdcRegisters> PollingAdc<R> {
    /// Power the converter and route `channels` to their analog pins
    ///
    /// The converter is left powered with no conversion running. Every
    /// channel is routed before power is applied, so a rejected channel
    /// leaves the converter off.
    pub fn configure(
        mut regs: R,
        channels: &[u8],
        config: &SamplerConfig,
    ) -> Result<Self, SamplerError> {
        if channels.is_empty() {
            return Err(SamplerError::NoChannels);
        }
        if let Some(&bad) = channels.iter().find(|&&ch| ch >= CHANNEL_COUNT) {
            return Err(SamplerError::InvalidChannel(bad));
        }

        let mut configured = 0u8;
        for &channel in channels {
            if !regs.route_channel(channel) {
                return Err(SamplerError::InvalidChannel(channel));
            }
            configured |= 1 << channel;
        }

        regs.power_up();

        let clkdiv = ((config.clock_divider as u32) << CR_CLKDIV_SHIFT) & CR_CLKDIV_MASK;
        regs.set_control(CR_PDN | clkdiv);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "adc: channels {=u8:#b}, clkdiv {}",
            configured,
            config.clock_divider
        );

        Ok(Self {
            regs,
            configured,
            max_polls: config.max_polls.max(1),
        })
    }

    /// Bitmask of configured channels
    pub fn channels(&self) -> u8 {
        self.configured
    }

    fn stop(&mut self) {
        let cr = self.regs.control();
        self.regs.set_control(cr & !CR_START_MASK);
    }
}

impl<R: AdcRegisters> AnalogSampler for PollingAdc<R> {
    fn read_channel(&mut self, channel: u8) -> Result<AdcSample, SamplerError> {
        if channel >= CHANNEL_COUNT {
            return Err(SamplerError::InvalidChannel(channel));
        }
        if self.configured & (1 << channel) == 0 {
            return Err(SamplerError::ChannelNotConfigured(channel));
        }

        // Exactly one select bit, then start as a separate write
        let cr = (self.regs.control() & !(CR_SEL_MASK | CR_START_MASK)) | (1 << channel);
        self.regs.set_control(cr);
        self.regs.set_control(cr | CR_START_NOW);

        for _ in 0..self.max_polls {
            let gdr = self.regs.global_data();
            if gdr & GDR_DONE != 0 {
                self.stop();
                return Ok(AdcSample::new(adc::result_field(gdr)));
            }
        }

        self.stop();

        #[cfg(feature = "defmt")]
        defmt::warn!("adc: channel {} timed out", channel);

        Err(SamplerError::Timeout {
            channel,
            polls: self.max_polls,
        })
    }
}
