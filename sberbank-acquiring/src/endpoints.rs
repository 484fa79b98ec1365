//! Gateway base URLs and operation paths.
//!
//! Paths under `/payment/rest/` belong to the REST family and are sent as
//! form-encoded bodies. Every other path is JSON.

/// Production gateway.
pub const API_URL: &str = "https://securepayments.sberbank.ru";
/// Sandbox gateway.
pub const SANDBOX_URL: &str = "https://3dsec.sberbank.ru";

/// One-phase order registration.
pub const REGISTER: &str = "/payment/rest/register.do";
/// Two-phase order registration (pre-authorization).
pub const REGISTER_PRE_AUTH: &str = "/payment/rest/registerPreAuth.do";
/// Completion of a pre-authorized order.
pub const DEPOSIT: &str = "/payment/rest/deposit.do";
/// Order reversal.
pub const REVERSE: &str = "/payment/rest/reverse.do";
/// Order refund.
pub const REFUND: &str = "/payment/rest/refund.do";
/// Refund without a prior order.
pub const INSTANT_REFUND: &str = "/payment/rest/instantRefund.do";
/// Refund of a raw sum with fiscal data.
pub const PROCESS_RAW_SUM_REFUND: &str = "/payment/rest/processRawSumRefund.do";
/// Refund of a single cart position.
pub const PROCESS_RAW_POSITION_REFUND: &str = "/payment/rest/processRawPositionRefund.do";
/// Extended order status.
pub const GET_ORDER_STATUS_EXTENDED: &str = "/payment/rest/getOrderStatusExtended.do";
/// Fiscal receipt status.
pub const GET_RECEIPT_STATUS: &str = "/payment/rest/getReceiptStatus.do";
/// Deactivates a stored card binding.
pub const UNBIND_CARD: &str = "/payment/rest/unBindCard.do";
/// Reactivates a stored card binding.
pub const BIND_CARD: &str = "/payment/rest/bindCard.do";
/// Lists bindings of a client.
pub const GET_BINDINGS: &str = "/payment/rest/getBindings.do";
/// Lists bindings by card number or binding id.
pub const GET_BINDINGS_BY_CARD_OR_ID: &str = "/payment/rest/getBindingsByCardOrId.do";
/// Changes the expiry date of a binding.
pub const EXTEND_BINDING: &str = "/payment/rest/extendBinding.do";
/// Creates a binding without a payment.
pub const CREATE_BINDING_NO_PAYMENT: &str = "/payment/rest/createBindingNoPayment.do";
/// Apple Pay payment.
pub const APPLE_PAY: &str = "/payment/applepay/payment.do";
/// Samsung Pay payment.
pub const SAMSUNG_PAY: &str = "/payment/samsung/payment.do";
/// Samsung Pay web payment.
pub const SAMSUNG_WEB_PAY: &str = "/payment/samsungWeb/payment.do";
/// Google Pay payment.
pub const GOOGLE_PAY: &str = "/payment/google/payment.do";
/// Mir Pay payment.
pub const MIR_PAY: &str = "/payment/mir/payment.do";
/// Mir Pay direct payment.
pub const MIR_PAY_DIRECT: &str = "/payment/mir/paymentDirect.do";
/// Declines an unpaid order.
pub const DECLINE: &str = "/payment/rest/decline.do";
/// External fiscal receipt lookup.
pub const EXTERNAL_RECEIPT: &str = "/fes-nspk-proxy/externalReceipt";
/// 3-D Secure enrollment check.
pub const VERIFY_ENROLLMENT: &str = "/payment/rest/verifyEnrollment.do";
/// SSL card list update.
pub const UPDATE_SSL_CARD_LIST: &str = "/payment/rest/updateSSLCardList.do";

/// Returns `true` when `path` belongs to the form-encoded REST family.
#[must_use]
pub fn is_rest_path(path: &str) -> bool {
    path.split('/').any(|segment| segment == "rest")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_family() {
        assert!(is_rest_path(REGISTER));
        assert!(is_rest_path(GET_BINDINGS_BY_CARD_OR_ID));
        assert!(!is_rest_path(APPLE_PAY));
        assert!(!is_rest_path(EXTERNAL_RECEIPT));
        assert!(!is_rest_path("/payment/restless/payment.do"));
    }
}
