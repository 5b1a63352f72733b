//! One-shot hardware peripheral initialization.
//!
//! Configures the battery ADC channel and the button GPIO using raw
//! ESP-IDF sys calls, then installs the button ISR. Called once from
//! `main()` before the event loop starts.  The status LED pin is owned by
//! an `esp-idf-hal` `PinDriver` and is not touched here.

#[cfg(target_os = "espidf")]
use core::sync::atomic::{AtomicPtr, Ordering};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    IsrInstallFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
        }
    }
}

impl core::error::Error for HwInitError {}

/// ADC1 channel wired to the battery divider (GPIO 1).
pub const ADC1_CH_BATTERY: u32 = 0;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before event loop; single-threaded.
    unsafe {
        init_adc()?;
        init_button_input()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

/// Written once by `init_adc()`, read by `adc1_read()`.
#[cfg(target_os = "espidf")]
static ADC1_HANDLE: AtomicPtr<core::ffi::c_void> = AtomicPtr::new(core::ptr::null_mut());

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    let mut handle: adc_oneshot_unit_handle_t = core::ptr::null_mut();
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &mut handle) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    let ret = unsafe { adc_oneshot_config_channel(handle, ADC1_CH_BATTERY, &chan_cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    ADC1_HANDLE.store(handle.cast(), Ordering::Release);
    info!(
        "hw_init: ADC1 CH{} configured (battery, GPIO {})",
        ADC1_CH_BATTERY,
        pins::BATTERY_ADC_GPIO
    );
    Ok(())
}

/// Raw 12-bit reading, or `None` if the ADC is not initialised or the
/// conversion failed.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> Option<u16> {
    let handle = ADC1_HANDLE.load(Ordering::Acquire);
    if handle.is_null() {
        return None;
    }
    let mut raw: i32 = 0;
    // SAFETY: the handle was created by init_adc() and is never freed;
    // only the main loop performs conversions.
    let ret = unsafe { adc_oneshot_read(handle.cast(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return None;
    }
    Some(raw.max(0) as u16)
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_button_input() -> Result<(), HwInitError> {
    let btn_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::BUTTON_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_NEGEDGE,
    };
    let ret = unsafe { gpio_config(&btn_cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }

    info!("hw_init: button input configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

// ── GPIO ISR Service ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe extern "C" fn button_gpio_isr(_arg: *mut core::ffi::c_void) {
    // SAFETY: esp_timer_get_time is a RTC counter read; safe in ISR context.
    let now_ms = (unsafe { esp_timer_get_time() } / 1_000) as u32;
    crate::drivers::button::button_isr_handler(now_ms);
}

/// Install per-pin GPIO ISR service and register the button handler.
/// Call after init_peripherals() and before the event loop.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<(), HwInitError> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed. The handler only stores an atomic.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        // Button: falling edge (active-low with pull-up already configured)
        gpio_set_intr_type(pins::BUTTON_GPIO, gpio_int_type_t_GPIO_INTR_NEGEDGE);
        gpio_isr_handler_add(pins::BUTTON_GPIO, Some(button_gpio_isr), core::ptr::null_mut());
        gpio_intr_enable(pins::BUTTON_GPIO);
    }
    info!("hw_init: ISR service installed (button)");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}
