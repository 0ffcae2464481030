/// The static help screen. Shown by the HELP command and when the program is
/// started with no arguments at all.
pub fn print_help() {
    println!("vdeskctl - command line tool to manage virtual desktops\n");
    println!("Parameters are processed as a pipeline of commands. The result of each");
    println!("command - most of the time the number of the processed desktop - feeds the");
    println!("next one, and the result of the last command becomes the exit code.");
    println!("Desktop numbers start with 0.\n");
    println!("Parameters (leading / can be omitted or - can be used instead):\n");
    println!("/Help /h /?      this help screen.");
    println!("/Verbose /Quiet  enable verbose (default) or quiet mode (short: /v and /q).");
    println!("/Break /Continue break (default) or continue on error (short: /b and /co).");
    println!("/List            list all virtual desktops (short: /li).");
    println!("/Count           get count of virtual desktops to pipeline (short: /c).");
    println!("/GetDesktop:<n|s>  get number of desktop <n> or desktop with text <s> in");
    println!("                   name to pipeline (short: /gd).");
    println!("/GetCurrentDesktop  get number of current desktop to pipeline (short: /gcd).");
    println!("/IsVisible[:<n|s>]  is desktop number <n>, desktop with text <s> in name or");
    println!("                   desktop with number in pipeline visible (short: /iv)?");
    println!("                   Returns 0 for visible and 1 for invisible.");
    println!("/Switch[:<n|s>]  switch to desktop number <n>, desktop with text <s> in name");
    println!("                   or desktop with number in pipeline (short: /s).");
    println!("/Left            switch to the desktop to the left (short: /l).");
    println!("/Right           switch to the desktop to the right (short: /ri).");
    println!("/Wrap /NoWrap    /Left or /Right wrap around or fail at the edge");
    println!("                   (default) (short: /w and /nw).");
    println!("/New             create new desktop (short: /n). Number goes to pipeline.");
    println!("/Remove[:<n|s>]  remove desktop number <n>, desktop with text <s> in name or");
    println!("                   desktop with number in pipeline (short: /r).");
    println!("/SwapDesktop:<n|s>  swap desktop in pipeline with desktop number <n> or");
    println!("                   desktop with text <s> in name (short: /sd).");
    println!("/InsertDesktop:<n|s>  insert desktop number <n> or desktop with text <s> in");
    println!("                   name before desktop in pipeline or vice versa (short: /id).");
    println!("/MoveWindow:<s|n>  move main window of process with name <s> or id <n> to");
    println!("                   desktop with number in pipeline (short: /mw).");
    println!("/MoveWindowHandle:<s|n>  move window with text <s> in title or handle <n> to");
    println!("                   desktop with number in pipeline (short: /mwh).");
    println!("/MoveActiveWindow  move the active window to desktop with number in pipeline");
    println!("                   (short: /maw).");
    println!("/GetDesktopFromWindow:<s|n>  get desktop number where process with name <s>");
    println!("                   or id <n> is displayed (short: /gdfw).");
    println!("/GetDesktopFromWindowHandle:<s|n>  get desktop number where window with text");
    println!("                   <s> in title or handle <n> is displayed (short: /gdfwh).");
    println!("/IsWindowOnDesktop:<s|n>  check if process with name <s> or id <n> is on");
    println!("                   desktop with number in pipeline (short: /iwod).");
    println!("                   Returns 0 for yes, 1 for no.");
    println!("/IsWindowHandleOnDesktop:<s|n>  check if window with text <s> in title or");
    println!("                   handle <n> is on desktop with number in pipeline");
    println!("                   (short: /iwhod). Returns 0 for yes, 1 for no.");
    println!("/PinWindow:<s|n>  pin process with name <s> or id <n> to all desktops");
    println!("                   (short: /pw).");
    println!("/PinWindowHandle:<s|n>  pin window with text <s> in title or handle <n> to");
    println!("                   all desktops (short: /pwh).");
    println!("/UnPinWindow:<s|n>  unpin process with name <s> or id <n> from all desktops");
    println!("                   (short: /upw).");
    println!("/UnPinWindowHandle:<s|n>  unpin window with text <s> in title or handle <n>");
    println!("                   from all desktops (short: /upwh).");
    println!("/IsWindowPinned:<s|n>  check if process with name <s> or id <n> is pinned to");
    println!("                   all desktops (short: /iwp). Returns 0 for yes, 1 for no.");
    println!("/IsWindowHandlePinned:<s|n>  check if window with text <s> in title or");
    println!("                   handle <n> is pinned to all desktops (short: /iwhp).");
    println!("                   Returns 0 for yes, 1 for no.");
    println!("/PinApplication:<s|n>  pin application with name <s> or id <n> to all");
    println!("                   desktops (short: /pa).");
    println!("/UnPinApplication:<s|n>  unpin application with name <s> or id <n> from all");
    println!("                   desktops (short: /upa).");
    println!("/IsApplicationPinned:<s|n>  check if application with name <s> or id <n> is");
    println!("                   pinned to all desktops (short: /iap). Returns 0 for yes,");
    println!("                   1 for no.");
    println!("/Calculate:<n>   add <n> to pipeline, negative values allowed");
    println!("                   (short: /calc, /ca).");
    println!("/WaitKey         wait for a key press (short: /wk).");
    println!("/Sleep:<n>       wait for <n> milliseconds (short: /sl).\n");
    println!("Hint: insert ^^ somewhere in window title parameters to prevent matching");
    println!("your own window. ^ is removed before searching window titles.\n");
    println!("Examples:");
    println!("vdeskctl /LIST");
    println!("vdeskctl \"-Switch:Desktop 2\"");
    println!("vdeskctl -New -Switch -GetCurrentDesktop");
    println!("vdeskctl Q N /MOVEACTIVEWINDOW /SWITCH");
    println!("vdeskctl sleep:200 gd:1 mw:firefox s");
    println!("vdeskctl /Count /continue /Remove /Remove /Count");
    println!("vdeskctl /Count /Calc:-1 /Switch");
    println!("vdeskctl -GetDesktop:1 \"-MoveWindowHandle:note^^pad\"");
}
