//! Bank and payment gateway code tables.

/// Payout recipient banks, keyed by SWIFT code.
pub const BANK_CODES: &[(&str, &str)] = &[
    ("PHBMMYKL", "Affin Bank Berhad"),
    ("BPMBMYKL", "AGROBANK / BANK PERTANIAN MALAYSIA BERHAD"),
    ("MFBBMYKL", "Alliance Bank Malaysia Berhad"),
    ("RJHIMYKL", "AL RAJHI BANKING & INVESTMENT CORPORATION (MALAYSIA) BERHAD"),
    ("ARBKMYKL", "AmBank (M) Berhad"),
    ("BIMBMYKL", "Bank Islam Malaysia Berhad"),
    ("BKRMMYKL", "Bank Kerjasama Rakyat Malaysia Berhad"),
    ("BMMBMYKL", "Bank Muamalat (Malaysia) Berhad"),
    ("BSNAMYK1", "Bank Simpanan Nasional Berhad"),
    ("CIBBMYKL", "CIMB Bank Berhad"),
    ("CITIMYKL", "Citibank Berhad"),
    ("HLBBMYKL", "Hong Leong Bank Berhad"),
    ("HBMBMYKL", "HSBC Bank Malaysia Berhad"),
    ("KFHOMYKL", "Kuwait Finance House"),
    ("MBBEMYKL", "Maybank / Malayan Banking Berhad"),
    ("OCBCMYKL", "OCBC Bank (Malaysia) Berhad"),
    ("PBBEMYKL", "Public Bank Berhad"),
    ("RHBBMYKL", "RHB Bank Berhad"),
    ("SCBLMYKX", "Standard Chartered Bank (Malaysia) Berhad"),
    ("UOVBMYKL", "United Overseas Bank (Malaysia) Berhad"),
];

/// Display names for FPX bank and payment gateway codes.
pub const PAYMENT_GATEWAY_ABBR: &[(&str, &str)] = &[
    ("ABMB0212", "Alliance Bank"),
    ("ABB0233", "Affin Bank"),
    ("AMBB0209", "AmBank"),
    ("BCBB0235", "CIMB Clicks"),
    ("BIMB0340", "Bank Islam"),
    ("BKRM0602", "Bank Rakyat"),
    ("BMMB0341", "Bank Muamalat"),
    ("BSN0601", "BSN"),
    ("CIT0217", "Citibank Berhad"),
    ("HLB0224", "Hong Leong Bank"),
    ("HSBC0223", "HSBC Bank"),
    ("KFH0346", "Kuwait Finance House"),
    ("MB2U0227", "Maybank2u"),
    ("MBB0227", "Maybank2E"),
    ("MBB0228", "Maybank2E"),
    ("OCBC0229", "OCBC Bank"),
    ("PBB0233", "Public Bank"),
    ("RHB0218", "RHB Now"),
    ("SCB0216", "Standard Chartered"),
    ("UOB0226", "UOB Bank"),
    ("BP-PPL01", "PayPal"),
    ("BP-2C2P1", "e-pay"),
    ("BP-2C2PC", "Visa / Mastercard"),
    ("BP-2C2PU", "UnionPay"),
    ("BP-OCBC1", "Visa / Mastercard"),
    ("BP-BST01", "Boost"),
    ("BP-SGP01", "Senangpay"),
    // staging only
    ("TEST0001", "Test 0001"),
    ("TEST0002", "Test 0002"),
    ("TEST0003", "Test 0003"),
    ("TEST0004", "Test 0004"),
    ("TEST0021", "Test 0021"),
    ("TEST0022", "Test 0022"),
    ("TEST0023", "Test 0023"),
    ("BP-FKR01", "Billplz Simulator"),
];

fn lookup(table: &'static [(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    table.iter().find(|(c, _)| *c == code).map(|(_, name)| *name)
}

/// Returns the bank name for a payout SWIFT code.
pub fn bank_name(swift_code: &str) -> Option<&'static str> {
    lookup(BANK_CODES, swift_code)
}

/// Returns the display name for an FPX bank or payment gateway code.
pub fn payment_gateway_name(code: &str) -> Option<&'static str> {
    lookup(PAYMENT_GATEWAY_ABBR, code)
}
